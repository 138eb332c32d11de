use super::spin_badge::SpinBadge;
use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::globe;
use crate::model::SpinPhase;
use web_sys::HtmlElement;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let map_ref = use_node_ref();
    let phase = use_state(|| SpinPhase::Waiting);
    let error = use_state(|| None::<String>);

    // Mount the globe once the container exists, tear it down on unmount
    {
        let map_ref = map_ref.clone();
        let phase = phase.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            let config = ViewerConfig::load();
            let mounted = map_ref
                .cast::<HtmlElement>()
                .ok_or_else(|| ViewerError::MissingElement("map".into()))
                .and_then(|container| {
                    let phase = phase.clone();
                    globe::mount(&container, &config, move |p| phase.set(p))
                });
            let handle = match mounted {
                Ok(handle) => Some(handle),
                Err(e) => {
                    log::error!("failed to mount globe: {e}");
                    error.set(Some(e.to_string()));
                    None
                }
            };
            move || drop(handle)
        });
    }

    let error_banner = match &*error {
        Some(msg) => html! {<div style="position:absolute; top:12px; left:50%; transform:translateX(-50%); background:#f85149; color:#fff; border-radius:8px; padding:6px 12px; font:13px sans-serif;">
            { format!("Map unavailable: {}", msg) }
        </div>},
        None => html! {},
    };

    html! {<div style="position:absolute; inset:0;">
        <div id="map" ref={map_ref} style="position:absolute; inset:0;"></div>
        <SpinBadge phase={*phase} />
        { error_banner }
    </div>}
}
