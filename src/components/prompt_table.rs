//! Customer intent table: topics, prompts, and a simulated visibility score.

use leptos::prelude::*;

use crate::data::Topic;
use crate::rng::Lcg;

/// Rows shown per topic.
const ENTRIES_PER_TOPIC: usize = 5;

/// One row per displayed entry, grouped visually by topic. Scores are
/// generated deterministically so the table is stable across renders.
#[component]
pub fn PromptTable(#[prop(into)] topics: Signal<Vec<Topic>>) -> impl IntoView {
	view! {
		<div class="prompt-table">
			<div class="prompt-table-header">
				<div class="col-cluster">"Topic Cluster"</div>
				<div class="col-prompt">"Customer Intent Prompt"</div>
				<div class="col-score">"Visibility"</div>
			</div>
			<div class="prompt-table-rows">
				{move || {
					let mut rng = Lcg::new(41);
					topics
						.get()
						.into_iter()
						.enumerate()
						.flat_map(|(topic_idx, topic)| {
							topic
								.entries
								.iter()
								.take(ENTRIES_PER_TOPIC)
								.enumerate()
								.map(|(entry_idx, entry)| {
									let score = 90.0 + rng.next_f64() * 9.9;
									let opacity = (score / 100.0).max(0.4);
									view! {
										<div class="prompt-row">
											<div class="col-cluster">
												{(entry_idx == 0)
													.then(|| {
														view! {
															<span class="cluster-name">{topic.topic.clone()}</span>
															<span class="cluster-id">
																{format!("ID: {:03}", topic_idx + 1)}
															</span>
														}
													})}
											</div>
											<div class="col-prompt">
												<p>{entry.prompt.clone()}</p>
											</div>
											<div class="col-score">
												<span class="score-value">{format!("{score:.1}")}</span>
												<span class="score-unit">"AEO"</span>
												<div class="score-meter">
													<div
														class="score-meter-fill"
														style=format!(
															"width: {score:.1}%; opacity: {opacity:.2};",
														)
													></div>
												</div>
											</div>
										</div>
									}
								})
								.collect::<Vec<_>>()
						})
						.collect_view()
				}}
			</div>
		</div>
	}
}
