//! Demo dataset loaded at startup

use super::schema::{AppData, Issue, LegislationEntry, Votes};

const NEIGHBORHOODS: [&str; 5] = ["Downtown", "Uptown", "Westside", "Eastside", "River North"];

const ISSUES: [(u32, &str, &str, &str); 10] = [
    (
        1,
        "Pothole on Main St",
        "Large pothole near the library needs filling.",
        "Downtown",
    ),
    (
        2,
        "Broken Streetlight on Elm Ave",
        "Streetlight out for 3 days, safety concern.",
        "Uptown",
    ),
    (
        3,
        "Park Cleanup Initiative",
        "Proposal for monthly volunteer park cleanups.",
        "Westside",
    ),
    (
        4,
        "Graffiti on Bridge",
        "Graffiti appeared on the pedestrian bridge.",
        "Downtown",
    ),
    (
        5,
        "Recycling Pickup Schedule Change",
        "Discussion about changing recycling pickup days.",
        "Eastside",
    ),
    (
        6,
        "Crosswalk Safety Study",
        "Request for a study on the Oak St crosswalk.",
        "Uptown",
    ),
    (
        7,
        "New Community Garden Location",
        "Potential site identified near the river.",
        "River North",
    ),
    (
        8,
        "Noise Complaint - Construction",
        "Early morning construction noise reported.",
        "Westside",
    ),
    (
        9,
        "Bike Lane Proposal - 1st Ave",
        "Proposal to add protected bike lanes.",
        "Downtown",
    ),
    (
        10,
        "Library Hour Extension Request",
        "Petition to extend library hours on weekends.",
        "Eastside",
    ),
];

fn legislation() -> Vec<LegislationEntry> {
    vec![
        LegislationEntry {
            id: "leg101".to_string(),
            title: "Green Spaces Initiative Act".to_string(),
            technical_summary: "Allocate 0.5% of municipal budget towards the acquisition and \
                maintenance of new public green spaces, prioritizing areas with less than 1 acre \
                per 1000 residents. Mandates ecological impact assessments for proposed sites."
                .to_string(),
            plain_summary: "Set aside a small part of the city budget to buy land and take care \
                of new parks, especially in neighborhoods that don't have many parks already. We \
                need to check how new parks might affect local plants and animals."
                .to_string(),
            votes: Votes::new(15, 3),
        },
        LegislationEntry {
            id: "leg102".to_string(),
            title: "Public Transit Enhancement Bill".to_string(),
            technical_summary: "Implement dedicated bus lanes on arterial routes A, B, and C \
                during peak hours (7-9 AM, 4-6 PM). Increase frequency of routes 5, 8, 12 to \
                every 15 minutes. Fund via a 0.1% sales tax increment."
                .to_string(),
            plain_summary: "Create special lanes just for buses on busy roads during rush hour \
                to make trips faster. Make buses on popular routes run more often (every 15 \
                minutes). Pay for it by slightly increasing the sales tax."
                .to_string(),
            votes: Votes::new(28, 12),
        },
        LegislationEntry {
            id: "leg103".to_string(),
            title: "Affordable Housing Zoning Reform".to_string(),
            technical_summary: "Amend zoning code R-2 to permit accessory dwelling units (ADUs) \
                by-right on qualifying lots. Reduce minimum lot size requirements in designated \
                transit corridors by 15%. Establish density bonuses for projects including >20% \
                affordable units."
                .to_string(),
            plain_summary: "Change building rules to allow homeowners to build small extra \
                apartments (like backyard cottages) on their property more easily. Allow \
                slightly smaller lots for new houses near bus/train lines. Give benefits to \
                builders who include more affordable homes in their projects."
                .to_string(),
            votes: Votes::new(45, 8),
        },
    ]
}

/// Fresh copy of the demo dataset with a zero feedback count
#[must_use]
pub fn demo_data() -> AppData {
    AppData {
        neighborhoods: NEIGHBORHOODS.iter().map(ToString::to_string).collect(),
        issues: ISSUES
            .iter()
            .map(|&(id, title, description, neighborhood)| Issue {
                id,
                title: title.to_string(),
                description: description.to_string(),
                neighborhood: neighborhood.to_string(),
            })
            .collect(),
        legislation: legislation(),
        feedback_count: 0,
    }
}
