//! Workflow page: staged keyword extraction, cluster analysis, and intent
//! generation over the static dataset.

use std::time::Duration;

use leptos::prelude::*;

use crate::components::cluster_graph::ClusterGraphCanvas;
use crate::components::custom_select::CustomSelect;
use crate::components::glass_card::GlassCard;
use crate::components::keyword_list::KeywordList;
use crate::components::loaders::{AnalysisLoader, ExtractionLoader, IntentLoader};
use crate::components::prompt_table::PromptTable;
use crate::data;

/// Fixed duration of each simulated workflow stage.
const STAGE_DELAY: Duration = Duration::from_millis(2500);

/// How far the workflow has progressed. Stages only advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
	Idle,
	Extracted,
	Analyzed,
	Generated,
}

/// An in-flight stage timer plus the busy flag its completion would clear.
/// Cancelling must release the flag too, or the owning button wedges in its
/// "Processing..." state with no remaining writer.
#[derive(Clone, Copy)]
struct PendingStage {
	handle: Option<TimeoutHandle>,
	busy: RwSignal<bool>,
}

impl PendingStage {
	fn cancel(self) {
		if let Some(handle) = self.handle {
			handle.clear();
		}
		self.busy.set(false);
	}
}

/// The whole single-page workspace.
#[component]
pub fn Home() -> impl IntoView {
	let category = RwSignal::new("EV Bikes".to_string());
	let country = RwSignal::new("Vietnam".to_string());

	let stage = RwSignal::new(Stage::Idle);
	let extracting = RwSignal::new(false);
	let analyzing = RwSignal::new(false);
	let generating = RwSignal::new(false);
	// At most one stage timer runs at a time; kept so unmount or a
	// re-trigger can cancel it.
	let pending = StoredValue::new(None::<PendingStage>);

	let topics = Signal::derive(data::simulation_data);

	// Each stage is a cancellable scheduled task, not real work: flip the
	// busy flag, complete after a fixed delay. Re-triggering cancels the
	// stage already in flight, busy flag included.
	let schedule = move |busy: RwSignal<bool>, next: Stage| {
		if let Some(prev) = pending.get_value() {
			prev.cancel();
		}
		busy.set(true);
		let handle = set_timeout_with_handle(
			move || {
				busy.set(false);
				stage.set(next);
				pending.set_value(None);
			},
			STAGE_DELAY,
		);
		pending.set_value(Some(PendingStage {
			handle: handle.ok(),
			busy,
		}));
	};
	on_cleanup(move || {
		if let Some(prev) = pending.get_value() {
			prev.cancel();
		}
	});

	let extraction_action = move || {
		(stage.get() >= Stage::Extracted)
			.then(|| view! { <span class="header-badge">"100K+ analyzed"</span> })
	};

	let analysis_action = move || {
		(stage.get() >= Stage::Extracted).then(|| {
			let done = move || stage.get() >= Stage::Analyzed;
			view! {
				<button
					type="button"
					class=move || if done() { "stage-button done" } else { "stage-button" }
					disabled=move || done() || analyzing.get()
					on:click=move |_| schedule(analyzing, Stage::Analyzed)
				>
					{move || {
						if done() {
							"Map Generated"
						} else if analyzing.get() {
							"Processing..."
						} else {
							"Process Data"
						}
					}}
				</button>
			}
		})
	};

	let intent_action = move || {
		(stage.get() >= Stage::Analyzed).then(|| {
			let done = move || stage.get() >= Stage::Generated;
			view! {
				<button
					type="button"
					class=move || {
						if done() { "stage-button done" } else { "stage-button primary" }
					}
					disabled=move || done() || generating.get()
					on:click=move |_| schedule(generating, Stage::Generated)
				>
					{move || {
						if done() {
							"Intents Ready"
						} else if generating.get() {
							"Generating..."
						} else {
							"Generate Intents"
						}
					}}
				</button>
			}
		})
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="app-shell">
				<header class="top-bar">
					<div class="top-bar-title">
						<h1>"AEO: Customer Intent Framework"</h1>
						<p>
							"From keywords " <span class="accent">"\u{2022}"</span>
							" Topic cluster analysis " <span class="accent">"\u{2022}"</span>
							" Customer Intent Prompts"
						</p>
					</div>
					<span class="status-pill">
						<span class="status-dot"></span>
						"SYSTEM ONLINE"
					</span>
				</header>

				<div class="workspace">
					<div class="config-toolbar">
						<span class="config-label">"Config"</span>
						<div class="config-selects">
							<CustomSelect
								value=category
								on_change=move |v: String| category.set(v)
								options=vec![("EV Bikes".to_string(), "EV Bikes".to_string())]
							/>
							<CustomSelect
								value=country
								on_change=move |v: String| country.set(v)
								options=vec![("Vietnam".to_string(), "Vietnam".to_string())]
							/>
						</div>
						<button
							type="button"
							class="init-button"
							disabled=move || extracting.get()
							on:click=move |_| schedule(extracting, Stage::Extracted)
						>
							{move || if extracting.get() { "Initializing..." } else { "Initialize" }}
						</button>
					</div>

					<div class="panel-grid">
						<div class="panel-keywords">
							<GlassCard title="Keyword Extraction" action=extraction_action>
								{move || {
									if extracting.get() {
										view! { <ExtractionLoader /> }.into_any()
									} else if stage.get() >= Stage::Extracted {
										view! { <KeywordList topics=topics /> }.into_any()
									} else {
										view! {
											<div class="panel-empty">
												<p>"Awaiting configuration..."</p>
											</div>
										}
											.into_any()
									}
								}}
							</GlassCard>
						</div>

						<div class="panel-clusters">
							<GlassCard title="Cluster Analysis" action=analysis_action>
								{move || {
									if analyzing.get() {
										view! { <AnalysisLoader /> }.into_any()
									} else if stage.get() >= Stage::Analyzed {
										view! {
											<div class="cluster-stage">
												<ClusterGraphCanvas data=topics />
											</div>
										}
											.into_any()
									} else {
										view! {
											<div class="panel-empty">
												<h4>"Analysis Pending"</h4>
												<p>
													"System standby. Initiate sequence to visualize data clusters."
												</p>
											</div>
										}
											.into_any()
									}
								}}
							</GlassCard>
						</div>
					</div>

					<div class="panel-intents">
						<GlassCard title="Customer Intent Mapping" action=intent_action>
							{move || {
								if generating.get() {
									view! { <IntentLoader /> }.into_any()
								} else if stage.get() >= Stage::Generated {
									view! { <PromptTable topics=topics /> }.into_any()
								} else {
									view! {
										<div class="panel-empty">
											<p class="mono">
												{move || {
													if stage.get() >= Stage::Analyzed {
														"READY FOR INTENT GENERATION"
													} else {
														"WORKFLOW INCOMPLETE"
													}
												}}
											</p>
										</div>
									}
										.into_any()
								}
							}}
						</GlassCard>
					</div>
				</div>
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn cancelling_a_pending_stage_releases_its_busy_flag() {
		let busy = RwSignal::new(true);
		PendingStage { handle: None, busy }.cancel();
		assert!(!busy.get());
	}

	#[test]
	fn retrigger_over_a_running_stage_frees_the_old_flag() {
		let analyzing = RwSignal::new(true);
		let extracting = RwSignal::new(false);
		let pending = PendingStage {
			handle: None,
			busy: analyzing,
		};

		// Initialize clicked while the analysis timer is still in flight:
		// the old stage must not stay stuck at "Processing...".
		pending.cancel();
		extracting.set(true);

		assert!(!analyzing.get());
		assert!(extracting.get());
	}
}
