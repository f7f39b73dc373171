use intent_atlas::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	leptos::mount::mount_to_body(|| {
		view! { <App /> }
	})
}
