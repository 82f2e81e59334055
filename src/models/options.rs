use serde::{Deserialize, Serialize};

/// Optional add-on for one booking session. Prices are fixed and may be zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalOption {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub selected: bool,
}

impl AdditionalOption {
    fn new(id: &str, name: &str, price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            selected: false,
        }
    }
}

/// Add-on catalog seeded into every new booking session, nothing selected.
pub fn default_catalog() -> Vec<AdditionalOption> {
    vec![
        AdditionalOption::new("airportVIP", "Service VIP aéroport", 30.0),
        AdditionalOption::new("babySeat", "Siège bébé (0-12 mois)", 10.0),
        AdditionalOption::new("childSeat", "Siège enfant (1-4 ans)", 10.0),
        AdditionalOption::new("boosterSeat", "Siège d'appoint (4-8 ans)", 10.0),
        AdditionalOption::new("pets", "Transport d'animaux domestiques", 20.0),
        AdditionalOption::new("earlyArrival", "Arrivée anticipée (15 min)", 0.0),
    ]
}

/// Returns a new sequence with exactly one entry's `selected` flag flipped.
/// An unknown id is a no-op, not an error: option catalogs evolve and a stale
/// client must not crash the session.
pub fn toggle_option(options: &[AdditionalOption], option_id: &str) -> Vec<AdditionalOption> {
    options
        .iter()
        .map(|option| {
            if option.id == option_id {
                AdditionalOption {
                    selected: !option.selected,
                    ..option.clone()
                }
            } else {
                option.clone()
            }
        })
        .collect()
}

/// Sum of prices over the selected subset; zero-priced options contribute 0.
pub fn sum_selected(options: &[AdditionalOption]) -> f64 {
    options
        .iter()
        .filter(|option| option.selected)
        .map(|option| option.price)
        .sum()
}
