//! Terminal-style loaders shown while a workflow stage "runs".
//!
//! Each loader is an interval-driven log feed: every tick reveals the next
//! canned step line and keeps only the last few visible. The interval clears
//! itself once the script is exhausted and is also cleared on unmount.

use std::time::Duration;

use leptos::prelude::*;

/// Start an interval that feeds `steps` into a line buffer of size `keep`.
/// Returns the visible lines and the number of completed steps.
fn log_feed(
	steps: &'static [&'static str],
	step_ms: u64,
	keep: usize,
) -> (ReadSignal<Vec<&'static str>>, ReadSignal<usize>) {
	let (lines, set_lines) = signal(Vec::<&'static str>::new());
	let (done, set_done) = signal(0usize);
	let handle_slot = StoredValue::new(None::<IntervalHandle>);

	let handle = set_interval_with_handle(
		move || {
			let i = done.get_untracked();
			if i >= steps.len() {
				if let Some(handle) = handle_slot.get_value() {
					handle.clear();
				}
				return;
			}
			set_lines.update(|visible| {
				visible.push(steps[i]);
				if visible.len() > keep {
					visible.remove(0);
				}
			});
			set_done.set(i + 1);
		},
		Duration::from_millis(step_ms),
	);
	if let Ok(handle) = handle {
		handle_slot.set_value(Some(handle));
		on_cleanup(move || handle.clear());
	}

	(lines, done)
}

fn log_lines(lines: ReadSignal<Vec<&'static str>>) -> impl IntoView {
	move || {
		lines
			.get()
			.into_iter()
			.map(|line| view! { <p class="loader-line">"> " {line}</p> })
			.collect_view()
	}
}

/// Keyword extraction loader: scrolling API log plus a progress bar. Paced
/// to finish just before the ~2.5 s stage timer.
#[component]
pub fn ExtractionLoader() -> impl IntoView {
	const STEPS: &[&str] = &[
		"Establishing secure connection...",
		"Authenticating with SEMRUSH API...",
		"Targeting Region: Vietnam (VN)...",
		"Fetching Category: EV & Auto...",
		"Querying Volume & KD% metrics...",
		"Extracting 120,000+ keywords...",
		"Filtering navigational intent...",
		"Clustering by semantic relevance...",
		"Finalizing dataset structure...",
	];
	let (lines, done) = log_feed(STEPS, 250, 7);
	let progress = move || done.get() * 100 / STEPS.len();

	view! {
		<div class="loader extraction-loader">
			<div class="loader-scanline"></div>
			<div class="loader-log">{log_lines(lines)}</div>
			<div class="loader-progress">
				<div
					class="loader-progress-bar"
					style=move || format!("width: {}%", progress())
				></div>
			</div>
			<span class="loader-progress-label">{move || format!("{}%", progress())}</span>
		</div>
	}
}

/// Cluster analysis loader: short log feed with a spinner.
#[component]
pub fn AnalysisLoader() -> impl IntoView {
	const STEPS: &[&str] = &[
		"Accessing vector database...",
		"Computing cosine similarity...",
		"Detecting semantic clusters...",
		"Optimizing graph topology...",
		"Applying force-directed layout...",
		"Finalizing visualization...",
	];
	let (lines, _done) = log_feed(STEPS, 400, 3);

	view! {
		<div class="loader analysis-loader">
			<div class="loader-spinner"></div>
			<div class="loader-log">{log_lines(lines)}</div>
		</div>
	}
}

/// Intent generation loader: log feed plus a progress bar.
#[component]
pub fn IntentLoader() -> impl IntoView {
	const STEPS: &[&str] = &[
		"Analyzing cluster semantics...",
		"Mapping keywords to user intent...",
		"Drafting natural language prompts...",
		"Scoring AEO brand visibility...",
		"Optimizing for voice search...",
		"Compiling final intent table...",
	];
	let (lines, done) = log_feed(STEPS, 415, 3);
	let progress = move || done.get() * 100 / STEPS.len();

	view! {
		<div class="loader intent-loader">
			<div class="loader-log">{log_lines(lines)}</div>
			<div class="loader-progress">
				<div
					class="loader-progress-bar"
					style=move || format!("width: {}%", progress())
				></div>
			</div>
			<span class="loader-progress-label">{move || format!("{}%", progress())}</span>
		</div>
	}
}
