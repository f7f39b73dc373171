//! Controlled dropdown select.

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Node;

/// Dropdown that closes on selection or on a mousedown anywhere outside it.
#[component]
pub fn CustomSelect(
	/// Currently selected value.
	#[prop(into)]
	value: Signal<String>,
	/// Called with the newly selected value.
	#[prop(into)]
	on_change: Callback<String>,
	/// `(value, label)` pairs.
	options: Vec<(String, String)>,
) -> impl IntoView {
	let open = RwSignal::new(false);
	let container_ref = NodeRef::<leptos::html::Div>::new();

	let outside_click = window_event_listener(ev::mousedown, move |ev| {
		let inside = container_ref
			.get()
			.zip(ev.target())
			.map(|(container, target)| {
				target
					.dyn_ref::<Node>()
					.is_some_and(|node| container.contains(Some(node)))
			})
			.unwrap_or(false);
		if !inside {
			open.set(false);
		}
	});
	on_cleanup(move || outside_click.remove());

	view! {
		<div class="custom-select" node_ref=container_ref>
			<button
				type="button"
				class="custom-select-trigger"
				on:click=move |_| open.update(|o| *o = !*o)
			>
				<span class="custom-select-value">{move || value.get()}</span>
				<span class=move || {
					if open.get() { "custom-select-chevron open" } else { "custom-select-chevron" }
				}>"\u{25be}"</span>
			</button>
			{move || {
				open.get()
					.then(|| {
						view! {
							<div class="custom-select-menu">
								{options
									.clone()
									.into_iter()
									.map(|(option_value, label)| {
										let is_selected = {
											let option_value = option_value.clone();
											move || value.get() == option_value
										};
										view! {
											<div
												class=move || {
													if is_selected() {
														"custom-select-option selected"
													} else {
														"custom-select-option"
													}
												}
												on:click=move |_| {
													on_change.run(option_value.clone());
													open.set(false);
												}
											>
												{label}
											</div>
										}
									})
									.collect_view()}
							</div>
						}
					})
			}}
		</div>
	}
}
