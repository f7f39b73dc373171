//! Titled card shell used by every workspace panel.

use leptos::children::{Children, ViewFn};
use leptos::prelude::*;

/// Card with a header row (title on the left, optional action slot on the
/// right) and a body that fills the remaining space.
#[component]
pub fn GlassCard(
	/// Header title.
	#[prop(into, optional)]
	title: String,
	/// Rendered at the right edge of the header, e.g. a stage button.
	#[prop(into, optional)]
	action: ViewFn,
	/// Card body.
	children: Children,
) -> impl IntoView {
	view! {
		<div class="glass-card">
			<div class="glass-card-header">
				<h3>{title}</h3>
				<div class="glass-card-action">{action.run()}</div>
			</div>
			<div class="glass-card-body">{children()}</div>
		</div>
	}
}
