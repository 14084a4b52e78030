//! Catalogue defaults and the option lists offered by the filter widgets.

/// Number of rows added to the limit by each "show more" request.
pub const PAGE_SIZE: u32 = 10;

/// Year sent to the listing API when no year filter is set.
pub const DEFAULT_YEAR: u16 = 2022;

/// Row limit sent to the listing API when no limit is set.
pub const DEFAULT_LIMIT: u32 = PAGE_SIZE;

/// Error shown when a failed fetch carries no message of its own.
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch cars. Please try again later.";

/// A labelled choice in a filter widget. An empty `value` means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub title: &'static str,
    pub value: &'static str,
}

pub const FUELS: &[FilterOption] = &[
    FilterOption {
        title: "Fuel",
        value: "",
    },
    FilterOption {
        title: "Gas",
        value: "Gas",
    },
    FilterOption {
        title: "Electricity",
        value: "Electricity",
    },
];

/// Year choices; `0` is the unset entry and collapses to [`DEFAULT_YEAR`].
pub const YEARS_OF_PRODUCTION: &[u16] = &[0, 2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023];

pub const MANUFACTURERS: &[&str] = &[
    "Acura",
    "Alfa Romeo",
    "Aston Martin",
    "Audi",
    "Bentley",
    "BMW",
    "Buick",
    "Cadillac",
    "Chevrolet",
    "Chrysler",
    "Citroen",
    "Dodge",
    "Ferrari",
    "Fiat",
    "Ford",
    "GMC",
    "Honda",
    "Hyundai",
    "Infiniti",
    "Jaguar",
    "Jeep",
    "Kia",
    "Lamborghini",
    "Land Rover",
    "Lexus",
    "Lincoln",
    "Maserati",
    "Mazda",
    "McLaren",
    "Mercedes-Benz",
    "MINI",
    "Mitsubishi",
    "Nissan",
    "Porsche",
    "Ram",
    "Renault",
    "Rolls-Royce",
    "Subaru",
    "Suzuki",
    "Tesla",
    "Toyota",
    "Volkswagen",
    "Volvo",
];

/// Manufacturers whose name contains `query`, ignoring case and whitespace.
///
/// An empty query matches every manufacturer.
pub fn matching_manufacturers(query: &str) -> Vec<&'static str> {
    let needle = normalize(query);
    MANUFACTURERS
        .iter()
        .copied()
        .filter(|name| normalize(name).contains(&needle))
        .collect()
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}
