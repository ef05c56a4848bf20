//! Static plant catalog.
//!
//! One [`PlantSpec`] per [`PlantKind`]. The numbers are game balance, not
//! configuration: they never change during a session.

use sprout_types::{PlantKind, PlantSpec};

/// Return the growing parameters for a plant variant.
///
/// [`PlantKind::Empty`] yields the all-zero spec.
pub const fn spec(kind: PlantKind) -> PlantSpec {
    match kind {
        PlantKind::Tomato => PlantSpec {
            kind,
            days_to_maturity: 10,
            water_needs: 15,
            value: 50,
            cost: 15,
            description: "Requires consistent watering and support. High yield value.",
        },
        PlantKind::Basil => PlantSpec {
            kind,
            days_to_maturity: 5,
            water_needs: 10,
            value: 25,
            cost: 5,
            description: "Fast growing herb. Great for beginners.",
        },
        PlantKind::Lettuce => PlantSpec {
            kind,
            days_to_maturity: 6,
            water_needs: 20,
            value: 30,
            cost: 8,
            description: "Needs plenty of water but grows quickly.",
        },
        PlantKind::Carrot => PlantSpec {
            kind,
            days_to_maturity: 12,
            water_needs: 10,
            value: 45,
            cost: 12,
            description: "Root vegetable. Low maintenance but slow.",
        },
        PlantKind::Strawberry => PlantSpec {
            kind,
            days_to_maturity: 15,
            water_needs: 25,
            value: 80,
            cost: 30,
            description: "High value fruit. Sensitive to water changes.",
        },
        PlantKind::Empty => PlantSpec {
            kind,
            days_to_maturity: 0,
            water_needs: 0,
            value: 0,
            cost: 0,
            description: "Empty plot.",
        },
    }
}

/// Specs for every plantable variant, in catalog order.
pub fn crops() -> impl Iterator<Item = PlantSpec> {
    PlantKind::CROPS.into_iter().map(spec)
}
