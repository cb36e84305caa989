use log::{debug, warn};
use stylist::css;
use stylist::yew::Global;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use yew::prelude::*;
use yew::AppHandle;

use crate::error::EnhanceError;
use crate::events::dispatch::{Dispatcher, Trigger};

const READ_MORE_SELECTOR: &str = ".btn-read-more";

/// What the overlay shows. Title and body are replaced wholesale on every
/// open, so nothing carries over between openings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    visible: bool,
    title: String,
    body: String,
}

impl ModalState {
    pub fn open(&mut self, title: String, body: String) {
        self.title = title;
        self.body = body;
        self.visible = true;
    }

    /// Returns whether the modal was open.
    pub fn close(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// `overflow` for the page body: scrolling is locked while open.
    pub fn body_overflow(&self) -> &'static str {
        if self.visible {
            "hidden"
        } else {
            "auto"
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

pub enum ModalMsg {
    Open { title: String, body: String },
    Close,
}

#[derive(Properties, PartialEq)]
pub struct ReadMoreModalProps {
    /// Page body; its scrolling is locked while the modal is open.
    pub body: HtmlElement,
}

pub struct ReadMoreModal {
    state: ModalState,
    overlay: NodeRef,
    content: NodeRef,
    just_opened: bool,
}

fn set_body_overflow(body: &HtmlElement, overflow: &str) {
    if let Err(err) = body.style().set_property("overflow", overflow) {
        warn!("Failed to set body overflow: {:?}", err);
    }
}

/// Raises the overlay's opacity on the next frame so the CSS transition
/// runs from the hidden state.
fn fade_in_next_frame(overlay: HtmlElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let callback = Closure::once_into_js(move || {
        let _ = overlay.style().set_property("opacity", "1");
    });
    if let Err(err) = window.request_animation_frame(callback.unchecked_ref()) {
        warn!("Failed to schedule modal fade-in: {:?}", err);
    }
}

impl Component for ReadMoreModal {
    type Message = ModalMsg;
    type Properties = ReadMoreModalProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: ModalState::default(),
            overlay: NodeRef::default(),
            content: NodeRef::default(),
            just_opened: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ModalMsg::Open { title, body } => {
                debug!("Opening read-more modal: {:?}", title);
                self.state.open(title, body);
                self.just_opened = true;
                set_body_overflow(&ctx.props().body, self.state.body_overflow());
                true
            }
            ModalMsg::Close => {
                if !self.state.close() {
                    return false;
                }
                set_body_overflow(&ctx.props().body, self.state.body_overflow());
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();

        // Only clicks on the backdrop itself close; clicks inside the panel bubble here too.
        let on_backdrop = {
            let overlay = self.overlay.clone();
            link.batch_callback(move |e: MouseEvent| {
                let target = e.target_dyn_into::<Element>();
                (target.is_some() && target == overlay.cast::<Element>()).then_some(ModalMsg::Close)
            })
        };
        let display = if self.state.is_open() {
            "display: flex;"
        } else {
            "display: none;"
        };

        html! {
            <>
                <Global css={css!(r#"
                    .read-more-modal {
                        position: fixed;
                        inset: 0;
                        z-index: 1000;
                        align-items: center;
                        justify-content: center;
                        background: rgba(0, 0, 0, 0.7);
                        opacity: 0;
                        transition: opacity 0.3s ease;
                    }
                    .read-more-modal .modal-content {
                        max-width: 720px;
                        max-height: 85vh;
                        overflow-y: auto;
                        margin: 1rem;
                        padding: 2rem;
                        border-radius: 12px;
                        background: #1a1a1a;
                        color: #ffffff;
                    }
                    .read-more-modal .modal-header {
                        display: flex;
                        flex-direction: row-reverse;
                        justify-content: space-between;
                        align-items: flex-start;
                        gap: 1rem;
                    }
                    .read-more-modal .modal-close {
                        background: none;
                        border: none;
                        color: inherit;
                        font-size: 2rem;
                        line-height: 1;
                        cursor: pointer;
                    }
                "#)} />
                <div
                    class="read-more-modal"
                    ref={self.overlay.clone()}
                    style={display}
                    onclick={on_backdrop}
                >
                    <div class="modal-content">
                        <div class="modal-header">
                            <button
                                class="modal-close"
                                aria-label="Close"
                                onclick={link.callback(|_: MouseEvent| ModalMsg::Close)}
                            >
                                {"\u{00d7}"}
                            </button>
                            <h2 class="modal-title">{ self.state.title().to_owned() }</h2>
                        </div>
                        <div class="modal-body" ref={self.content.clone()}></div>
                    </div>
                </div>
            </>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        if !std::mem::take(&mut self.just_opened) {
            return;
        }
        // Body markup comes from the page author and is injected as-is.
        if let Some(content) = self.content.cast::<Element>() {
            content.set_inner_html(self.state.body());
        }
        if let Some(overlay) = self.overlay.cast::<HtmlElement>() {
            fade_in_next_frame(overlay);
        }
    }
}

pub struct ModalHandle {
    _app: AppHandle<ReadMoreModal>,
}

/// Appends the shared overlay to `<body>` and routes Escape and
/// `.btn-read-more` clicks to it.
pub fn mount(document: &Document, dispatcher: &mut Dispatcher) -> Result<Option<ModalHandle>, EnhanceError> {
    let Some(body) = document.body() else {
        return Ok(None);
    };

    let host = document.create_element("div")?;
    host.set_class_name("read-more-host");
    body.append_child(&host)?;

    let app = yew::Renderer::<ReadMoreModal>::with_root_and_props(host, ReadMoreModalProps { body }).render();
    let scope = (*app).clone();

    dispatcher.on(Trigger::Key("Escape"), {
        let scope = scope.clone();
        move |_, _| scope.send_message(ModalMsg::Close)
    })?;
    dispatcher.on(Trigger::Click(READ_MORE_SELECTOR), move |event, control| {
        let Some(control) = control else {
            return;
        };
        event.prevent_default();
        scope.send_message(ModalMsg::Open {
            title: control.get_attribute("data-title").unwrap_or_default(),
            body: control.get_attribute("data-content").unwrap_or_default(),
        });
    })?;

    Ok(Some(ModalHandle { _app: app }))
}
