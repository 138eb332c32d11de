use crate::model::SpinPhase;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SpinBadgeProps {
    pub phase: SpinPhase,
}

#[function_component(SpinBadge)]
pub fn spin_badge(props: &SpinBadgeProps) -> Html {
    let dot = match props.phase {
        SpinPhase::Spinning => "#2ea043",
        SpinPhase::Interacting => "#f0883e",
        SpinPhase::Stopped => "#58a6ff",
        SpinPhase::Waiting => "#6e7681",
    };
    html! {<div style="position:absolute; left:12px; bottom:28px; background:rgba(22,27,34,0.85); border:1px solid #30363d; border-radius:8px; padding:4px 10px; display:flex; gap:6px; align-items:center; color:#c9d1d9; font:12px sans-serif; pointer-events:none;">
        <span style={format!("width:8px; height:8px; border-radius:50%; background:{};", dot)}></span>
        <span>{ props.phase.label() }</span>
    </div>}
}
