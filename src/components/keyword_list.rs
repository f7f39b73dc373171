//! Extraction result panel: real keywords plus generated filler, as chips.

use leptos::prelude::*;

use crate::data::{self, Topic};
use crate::rng::Lcg;

/// The list is padded with filler keywords up to this size so it reads like
/// a full extraction pull.
const TARGET_COUNT: usize = 1000;

/// Keyword chips, real entries first. Real keywords are tagged with their
/// source; filler is visually muted.
#[component]
pub fn KeywordList(#[prop(into)] topics: Signal<Vec<Topic>>) -> impl IntoView {
	let chips = Memo::new(move |_| {
		let topics = topics.get();
		let mut chips: Vec<(String, bool)> = topics
			.iter()
			.flat_map(|t| t.entries.iter().filter_map(|e| e.keyword.clone()))
			.map(|keyword| (keyword, true))
			.collect();
		let needed = TARGET_COUNT.saturating_sub(chips.len());
		let mut rng = Lcg::new(chips.len() as u32 + 7);
		chips.extend(
			data::filler_keywords(needed, &mut rng)
				.into_iter()
				.map(|keyword| (keyword, false)),
		);
		chips
	});

	view! {
		<div class="keyword-list">
			{move || {
				chips
					.get()
					.into_iter()
					.map(|(keyword, real)| {
						view! {
							<div class=if real { "keyword-chip real" } else { "keyword-chip" }>
								<span class="keyword-text">{keyword}</span>
								<span class="keyword-source">
									<span class="keyword-dot"></span>
									{if real { "SEMRUSH" } else { "EXTENDED" }}
								</span>
							</div>
						}
					})
					.collect_view()
			}}
		</div>
	}
}
