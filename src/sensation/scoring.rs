use super::types::{Classification, SensationResponse, SensationSite, Toe};
use crate::types::FootSide;

/// Create the six screening sites in the order the test walks them:
/// left foot then right, big toe then 3rd then 5th on each. The UI relies
/// on this exact ordering for progress display.
pub fn initialize_sites() -> Vec<SensationSite> {
    let feet = [FootSide::Left, FootSide::Right];
    let toes = [Toe::Big, Toe::Third, Toe::Fifth];

    let mut sites = Vec::with_capacity(feet.len() * toes.len());
    for foot in feet {
        for toe in toes {
            sites.push(SensationSite {
                toe,
                foot,
                response: None,
            });
        }
    }
    sites
}

/// Count of sites the user clearly felt. `faint`, `not-felt`, and
/// unanswered sites all score zero.
pub fn calculate_score(sites: &[SensationSite]) -> u32 {
    sites
        .iter()
        .filter(|site| site.response == Some(SensationResponse::Felt))
        .count() as u32
}

/// Map a score to its risk bucket. The cut points (>=5 normal, ==4
/// borderline, <=3 at-risk) are the clinically meaningful contract of this
/// crate and must not move.
pub fn classify(score: u32) -> Classification {
    if score >= 5 {
        Classification::Normal
    } else if score == 4 {
        Classification::Borderline
    } else {
        Classification::AtRisk
    }
}

/// Instruction text for one site, e.g. "Touch the left big toe".
pub fn instruction(site: &SensationSite) -> String {
    format!("Touch the {} {}", site.foot, site.toe.label())
}
