use gloo_timers::callback::{Interval, Timeout};
use log::debug;
use stylist::css;
use stylist::yew::Global;
use web_sys::{Document, Element, TouchEvent, TouchList};
use yew::prelude::*;
use yew::AppHandle;

use super::slider_state::{AutoplaySlot, SliderState, SwipeTracker, POSITION_CLASSES};
use crate::config::SliderConfig;
use crate::dom;
use crate::error::EnhanceError;
use crate::events::dispatch::{Dispatcher, Trigger};
use crate::events::listener::EventListener;

const SLIDER_SELECTOR: &str = ".hero-slider";
const SLIDE_SELECTOR: &str = ".slide";

pub enum SliderMsg {
    Next,
    Prev,
    GoTo(usize),
    Unlock,
    PauseAutoplay,
    ResumeAutoplay,
    TouchStart(f64),
    TouchEnd(f64),
}

#[derive(Properties, PartialEq)]
pub struct HeroSliderProps {
    /// Slides from the page markup, in document order.
    pub slides: Vec<Element>,
    pub config: SliderConfig,
}

/// Renders the arrows and dots for a `.hero-slider` and keeps the page's
/// `.slide` elements classed to match the current index.
pub struct HeroSlider {
    state: SliderState,
    swipe: SwipeTracker,
    autoplay: AutoplaySlot<Interval>,
    unlock: Option<Timeout>,
}

impl HeroSlider {
    fn start_autoplay(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(ctx.props().config.autoplay_ms, move || {
            link.send_message(SliderMsg::Next);
        })
    }

    /// Releases the lock after the fixed transition window, whether or not
    /// the CSS animation has finished.
    fn after_step(&mut self, ctx: &Context<Self>, moved: bool) -> bool {
        if !moved {
            return false;
        }
        debug!(
            "Hero slider at {} of {}",
            self.state.current() + 1,
            self.state.slide_count()
        );
        let link = ctx.link().clone();
        // The previous timeout, if any, has already fired: only it releases the lock.
        self.unlock.replace(Timeout::new(ctx.props().config.transition_ms, move || {
            link.send_message(SliderMsg::Unlock);
        }));
        true
    }

    fn paint_slides(&self, slides: &[Element]) {
        for (index, slide) in slides.iter().enumerate() {
            let classes = slide.class_list();
            for class in POSITION_CLASSES {
                let _ = classes.remove_1(class);
            }
            if let Some(class) = self.state.position_of(index).class() {
                let _ = classes.add_1(class);
            }
        }
    }
}

impl Component for HeroSlider {
    type Message = SliderMsg;
    type Properties = HeroSliderProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        Self {
            state: SliderState::new(props.slides.len()),
            swipe: SwipeTracker::new(props.config.swipe_threshold_px),
            autoplay: AutoplaySlot::running(Self::start_autoplay(ctx)),
            unlock: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            SliderMsg::Next => {
                let moved = self.state.next();
                self.after_step(ctx, moved)
            }
            SliderMsg::Prev => {
                let moved = self.state.prev();
                self.after_step(ctx, moved)
            }
            SliderMsg::GoTo(index) => {
                if self.state.is_transitioning() {
                    debug!("Ignoring jump to slide {} during transition", index + 1);
                }
                self.state.go_to(index)
            }
            SliderMsg::Unlock => {
                // Sent from inside the timeout's own callback, so the handle
                // stays until the next step replaces it.
                self.state.unlock();
                false
            }
            SliderMsg::PauseAutoplay => {
                if self.autoplay.pause() {
                    debug!("Hero slider autoplay paused");
                }
                false
            }
            SliderMsg::ResumeAutoplay => {
                if self.autoplay.resume(Self::start_autoplay(ctx)) {
                    debug!("Hero slider autoplay restarted while already running");
                }
                false
            }
            SliderMsg::TouchStart(x) => {
                self.swipe.start(x);
                false
            }
            SliderMsg::TouchEnd(x) => match self.swipe.end(x) {
                Some(direction) => {
                    let moved = self.state.step(direction);
                    self.after_step(ctx, moved)
                }
                None => false,
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        html! {
            <>
                <Global css={css!(r#"
                    .hero-slider .slider-controls {
                        position: absolute;
                        top: 50%;
                        transform: translateY(-50%);
                        z-index: 5;
                        background: transparent;
                        border: none;
                        cursor: pointer;
                    }
                    .hero-slider .slider-controls.prev {
                        left: 1rem;
                    }
                    .hero-slider .slider-controls.next {
                        right: 1rem;
                    }
                    .hero-slider .slider-dots {
                        position: absolute;
                        bottom: 1.5rem;
                        left: 50%;
                        transform: translateX(-50%);
                        display: flex;
                        gap: 0.5rem;
                        z-index: 5;
                    }
                    .hero-slider .dot {
                        width: 10px;
                        height: 10px;
                        border-radius: 50%;
                        border: none;
                        padding: 0;
                        cursor: pointer;
                        background: rgba(255, 255, 255, 0.5);
                    }
                    .hero-slider .dot.active {
                        background: #ffffff;
                    }
                "#)} />
                <button
                    class="slider-controls prev"
                    aria-label="Previous slide"
                    onclick={link.callback(|_: MouseEvent| SliderMsg::Prev)}
                >
                    <span class="slider-btn">{"\u{276e}"}</span>
                </button>
                <button
                    class="slider-controls next"
                    aria-label="Next slide"
                    onclick={link.callback(|_: MouseEvent| SliderMsg::Next)}
                >
                    <span class="slider-btn">{"\u{276f}"}</span>
                </button>
                <div class="slider-dots">
                    { for (0..self.state.slide_count()).map(|index| html! {
                        <button
                            class={classes!("dot", self.state.dot_is_active(index).then_some("active"))}
                            aria-label={format!("Go to slide {}", index + 1)}
                            onclick={link.callback(move |_: MouseEvent| SliderMsg::GoTo(index))}
                        />
                    }) }
                </div>
            </>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.paint_slides(&ctx.props().slides);
    }
}

/// Keeps the mounted slider and its container subscriptions alive.
pub struct SliderHandle {
    _app: AppHandle<HeroSlider>,
    _listeners: Vec<EventListener>,
}

fn first_touch_x(touches: &TouchList) -> Option<f64> {
    touches.get(0).map(|touch| f64::from(touch.client_x()))
}

/// Mounts the slider controls into the first `.hero-slider` and wires hover,
/// touch and arrow-key input to it.
pub fn mount(
    document: &Document,
    dispatcher: &mut Dispatcher,
    config: &SliderConfig,
) -> Result<Option<SliderHandle>, EnhanceError> {
    let Some(container) = document.query_selector(SLIDER_SELECTOR)? else {
        return Ok(None);
    };
    let slides = dom::elements(&container.query_selector_all(SLIDE_SELECTOR)?);
    if slides.is_empty() {
        return Ok(None);
    }

    let host = document.create_element("div")?;
    host.set_class_name("slider-ui");
    container.append_child(&host)?;

    let app = yew::Renderer::<HeroSlider>::with_root_and_props(
        host,
        HeroSliderProps {
            slides,
            config: *config,
        },
    )
    .render();
    let scope = (*app).clone();

    let listeners = vec![
        EventListener::new(&container, "mouseenter", {
            let scope = scope.clone();
            move |_| scope.send_message(SliderMsg::PauseAutoplay)
        })?,
        EventListener::new(&container, "mouseleave", {
            let scope = scope.clone();
            move |_| scope.send_message(SliderMsg::ResumeAutoplay)
        })?,
        EventListener::typed::<TouchEvent, _>(&container, "touchstart", {
            let scope = scope.clone();
            move |event| {
                if let Some(x) = first_touch_x(&event.touches()) {
                    scope.send_message(SliderMsg::TouchStart(x));
                }
            }
        })?,
        EventListener::typed::<TouchEvent, _>(&container, "touchend", {
            let scope = scope.clone();
            move |event| {
                if let Some(x) = first_touch_x(&event.changed_touches()) {
                    scope.send_message(SliderMsg::TouchEnd(x));
                }
            }
        })?,
    ];

    dispatcher.on(Trigger::Key("ArrowLeft"), {
        let scope = scope.clone();
        move |_, _| scope.send_message(SliderMsg::Prev)
    })?;
    dispatcher.on(Trigger::Key("ArrowRight"), move |_, _| {
        scope.send_message(SliderMsg::Next)
    })?;

    Ok(Some(SliderHandle {
        _app: app,
        _listeners: listeners,
    }))
}
