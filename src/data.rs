//! Static demo dataset and the filler-keyword generator.
//!
//! The workflow never fetches anything; every stage reveals another slice of
//! this in-memory dataset. Keywords drive the cluster visualization, prompts
//! drive the intent table, and entries without a keyword exist only for their
//! prompt.

use crate::rng::Lcg;

/// One keyword/prompt pair inside a topic. The keyword may be absent for
/// prompt-only entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
	/// Search keyword, if this entry carries one.
	pub keyword: Option<String>,
	/// Customer intent prompt derived from the keyword (or standalone).
	pub prompt: String,
}

/// A named topic cluster with its entries.
#[derive(Clone, Debug, PartialEq)]
pub struct Topic {
	/// Unique cluster name.
	pub topic: String,
	/// Ordered entries belonging to this cluster.
	pub entries: Vec<Entry>,
}

fn entry(keyword: Option<&str>, prompt: &str) -> Entry {
	Entry {
		keyword: keyword.map(str::to_string),
		prompt: prompt.to_string(),
	}
}

/// The fixed "EV Bikes / Vietnam" dataset backing the whole demo.
pub fn simulation_data() -> Vec<Topic> {
	vec![
		Topic {
			topic: "Urban Commuting".to_string(),
			entries: vec![
				entry(
					Some("electric bike for city commuting"),
					"What is the best electric bike for daily commuting in Ho Chi Minh City traffic?",
				),
				entry(
					Some("lightweight e-bike Hanoi"),
					"Which lightweight electric bikes handle Hanoi's narrow streets well?",
				),
				entry(
					Some("e-bike range per charge"),
					"How far can a commuter e-bike travel on a single charge in city conditions?",
				),
				entry(
					Some("electric bike rain resistance"),
					"Can I ride an electric bike safely through the rainy season in Vietnam?",
				),
				entry(
					None,
					"Summarize the trade-offs between e-bikes and petrol scooters for a 12 km commute.",
				),
				entry(
					Some("e-bike top speed city"),
					"What top speed do urban electric bikes reach and is it legal in Vietnamese cities?",
				),
			],
		},
		Topic {
			topic: "Battery & Charging".to_string(),
			entries: vec![
				entry(
					Some("EV bike battery lifespan"),
					"How many years does an electric bike battery last before replacement?",
				),
				entry(
					Some("charging station Ho Chi Minh"),
					"Where can I find public charging stations for electric bikes in Ho Chi Minh City?",
				),
				entry(
					Some("lithium vs lead acid e-bike"),
					"Should I choose a lithium or lead-acid battery for my electric bike?",
				),
				entry(
					Some("e-bike charging time"),
					"How long does it take to fully charge an electric bike at home?",
				),
				entry(
					Some("swap battery service"),
					"Which brands offer battery swapping instead of home charging in Vietnam?",
				),
			],
		},
		Topic {
			topic: "Price & Financing".to_string(),
			entries: vec![
				entry(
					Some("electric bike price Vietnam"),
					"How much does a good electric bike cost in Vietnam in 2025?",
				),
				entry(
					Some("e-bike installment plan"),
					"Which dealers offer zero-interest installment plans for electric bikes?",
				),
				entry(
					Some("cheap electric bike under 20 million"),
					"What is the best electric bike available under 20 million VND?",
				),
				entry(
					None,
					"Compare total cost of ownership of an e-bike versus a petrol scooter over 3 years.",
				),
				entry(
					Some("e-bike resale value"),
					"How well do electric bikes hold their resale value compared to petrol scooters?",
				),
			],
		},
		Topic {
			topic: "Maintenance & Service".to_string(),
			entries: vec![
				entry(
					Some("electric bike maintenance cost"),
					"What does yearly maintenance cost for an electric bike?",
				),
				entry(
					Some("e-bike mechanic near me"),
					"How do I find a qualified electric bike mechanic nearby?",
				),
				entry(
					Some("brake pads electric bike"),
					"How often should brake pads be replaced on an electric bike?",
				),
				entry(
					Some("e-bike warranty coverage"),
					"What does a standard electric bike warranty cover in Vietnam?",
				),
			],
		},
		Topic {
			topic: "Regulations & Registration".to_string(),
			entries: vec![
				entry(
					Some("e-bike license requirement Vietnam"),
					"Do I need a driving license to ride an electric bike in Vietnam?",
				),
				entry(
					Some("electric bike registration"),
					"How do I register a new electric bike and what documents are required?",
				),
				entry(
					Some("e-bike helmet law"),
					"Are helmets mandatory for electric bike riders and passengers?",
				),
				entry(
					Some("import tax electric bike"),
					"What import taxes apply to electric bikes brought into Vietnam?",
				),
			],
		},
		Topic {
			topic: "Brand Comparison".to_string(),
			entries: vec![
				entry(
					Some("VinFast vs Yadea"),
					"How does VinFast compare to Yadea for commuter electric bikes?",
				),
				entry(
					Some("best e-bike brand 2025"),
					"Which electric bike brand has the best reliability record in 2025?",
				),
				entry(
					Some("Dat Bike review"),
					"Is the Dat Bike Weaver worth its price for daily use?",
				),
				entry(
					Some("Chinese vs Vietnamese e-bike"),
					"Are Vietnamese-built electric bikes better supported than imported Chinese ones?",
				),
				entry(
					None,
					"Rank the top five e-bike brands in Vietnam by after-sales service quality.",
				),
			],
		},
	]
}

const PREFIXES: &[&str] = &[
	"Best",
	"Cheap",
	"New",
	"Used",
	"Top rated",
	"Affordable",
	"Premium",
	"Fast",
	"Safe",
	"Eco-friendly",
	"Smart",
	"Luxury",
	"Budget",
	"Local",
	"Imported",
	"Reliable",
	"Durable",
	"Compact",
	"High-speed",
	"Long-range",
];

const CORES: &[&str] = &[
	"electric bike",
	"e-scooter",
	"electric motorcycle",
	"EV battery",
	"charging station",
	"lithium battery",
	"hub motor",
	"brake pads",
	"tires",
	"controller",
	"helmet",
	"accessories",
	"spare parts",
	"rental service",
	"mechanic",
	"suspension",
	"headlight",
	"smart key",
	"GPS tracker",
	"insurance",
];

const LOCATIONS: &[&str] = &[
	"Vietnam",
	"Hanoi",
	"Ho Chi Minh City",
	"Da Nang",
	"Can Tho",
	"Hai Phong",
	"District 1",
	"District 7",
	"Thu Duc",
	"near me",
	"Hue",
	"Nha Trang",
	"Vung Tau",
	"Binh Duong",
	"Dong Nai",
];

const SUFFIXES: &[&str] = &[
	"price",
	"cost",
	"review",
	"2024",
	"2025",
	"specs",
	"promotion",
	"deal",
	"discount",
	"installment",
	"warranty",
	"problems",
	"maintenance",
	"legal",
	"registration",
	"tax",
	"for sale",
	"shop",
	"dealer",
	"comparison",
];

/// Generate `count` plausible-looking filler keywords. Purely cosmetic: pads
/// the extraction list out to a fixed size so the demo reads like a real
/// 100k-keyword pull.
pub fn filler_keywords(count: usize, rng: &mut Lcg) -> Vec<String> {
	(0..count)
		.map(|_| {
			let prefix = PREFIXES[rng.index(PREFIXES.len())];
			let core = CORES[rng.index(CORES.len())];
			let location = if rng.next_f64() > 0.6 {
				LOCATIONS[rng.index(LOCATIONS.len())]
			} else {
				""
			};
			let suffix = SUFFIXES[rng.index(SUFFIXES.len())];

			let pattern = rng.next_f64();
			let keyword = if pattern < 0.3 {
				format!("{prefix} {core} {suffix}")
			} else if pattern < 0.6 {
				format!("{core} {suffix} {location}")
			} else {
				format!("{prefix} {core} {location}")
			};
			keyword.trim().to_string()
		})
		.collect()
}
