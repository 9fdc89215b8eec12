//! 輪播與問答面板使用的固定內容

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attraction {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

/// 換算器提供的幣別 (不含目標幣別本身)
pub const CURRENCY_CHOICES: &[&str] = &["USD", "EUR", "GBP", "INR", "PKR", "PHP", "AED", "QAR"];

pub fn attractions() -> Vec<Attraction> {
    vec![
        Attraction {
            id: 1,
            title: "Museum of Islamic Art and Waterfront",
            description: "The Museum of Islamic Art sits on its own island along the Doha Corniche. \
                Designed by I. M. Pei, it houses centuries of Islamic art spanning three continents. \
                The surrounding park and waterfront offer stunning skyline views.",
        },
        Attraction {
            id: 2,
            title: "Katara Cultural Village",
            description: "Katara Cultural Village is a prominent cultural and commercial hub. \
                It features an amphitheatre, convention centre, and diverse dining and shopping \
                options set in traditional architecture.",
        },
        Attraction {
            id: 3,
            title: "Souq Waqif",
            description: "Souq Waqif is a traditional market with restored buildings, alleyways, \
                and a variety of shops, restaurants, and cultural experiences in the heart of Doha.",
        },
        Attraction {
            id: 4,
            title: "The Pearl-Qatar",
            description: "The Pearl-Qatar is an artificial island with marinas, residential towers, \
                and Mediterranean-style quarters, offering dining, shopping, and waterfront promenades.",
        },
        Attraction {
            id: 5,
            title: "National Museum of Qatar",
            description: "The National Museum of Qatar presents the story of Qatar through innovative \
                architecture and immersive exhibitions in a building inspired by the desert rose.",
        },
        Attraction {
            id: 6,
            title: "Inland Sea",
            description: "The Inland Sea (Khor Al Adaid) is a natural reserve where the desert meets \
                the sea. Accessible only by 4x4, it offers dramatic dune landscapes and serene \
                turquoise waters near the Saudi border.",
        },
    ]
}

pub fn travel_questions() -> Vec<TravelQuestion> {
    vec![
        TravelQuestion {
            id: "layover",
            question: "Are you there on a layover or just for a day?",
            answer: "On a short layover or day trip, visit the Museum of Islamic Art, stroll along \
                the Corniche, or explore Souq Waqif. The Doha Metro connects the airport to key \
                spots quickly and affordably.",
        },
        TravelQuestion {
            id: "multi-day",
            question: "Are you there to stay for a couple of days?",
            answer: "For a multi-day stay, spread your itinerary across Katara Cultural Village, \
                The Pearl-Qatar, the National Museum, and Aspire Park. Renting a car or using \
                ride-hailing apps gives you the most flexibility for day trips outside the city.",
        },
    ]
}

pub fn panel_ids() -> Vec<String> {
    travel_questions()
        .iter()
        .map(|q| q.id.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_attraction_ids_are_unique() {
        let items = attractions();
        let ids: HashSet<u32> = items.iter().map(|a| a.id).collect();
        assert_eq!(items.len(), 6);
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn test_currency_choices_are_valid_codes() {
        for code in CURRENCY_CHOICES {
            assert!(code.parse::<crate::domain::model::CurrencyCode>().is_ok());
        }
    }

    #[test]
    fn test_panel_ids_match_questions() {
        assert_eq!(panel_ids(), vec!["layover", "multi-day"]);
    }
}
