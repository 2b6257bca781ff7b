//! Party color policy.

use std::fmt;

/// Alpha applied to every fill color unless configured otherwise.
pub const DEFAULT_ALPHA: u8 = 160;

/// RGBA color as emitted in CZML `rgba` arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Divisions with no known occupant at a given time.
    pub const fn unknown(alpha: u8) -> Self {
        Self::new(255, 255, 255, alpha)
    }

    pub const fn components(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl fmt::Display for Rgba {
    /// Format as CSS: rgba(r,g,b,a)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a as f64 / 255.0)
    }
}

const RED: [u8; 3] = [255, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const GREEN: [u8; 3] = [0, 255, 0];
const YELLOW: [u8; 3] = [255, 255, 0];
const GREY: [u8; 3] = [84, 84, 84];

/// Party names exactly as they appear in the results files. State branches
/// of the major parties are listed individually.
const PARTY_COLORS: &[(&str, [u8; 3])] = &[
    ("Australian Labor Party", RED),
    ("Australian Labor Party (State of Queensland)", RED),
    ("Liberal", BLUE),
    ("Liberal National Party of Queensland", BLUE),
    ("Liberal National Party", BLUE),
    ("Country Liberals (NT)", BLUE),
    ("CLP - The Territory Party", BLUE),
    ("The Nationals", BLUE),
    ("The Greens", GREEN),
    ("Palmer United Party", YELLOW),
];

/// Fill color for a party. Independents and unlisted parties are grey.
pub fn party_color(party: &str, alpha: u8) -> Rgba {
    let [r, g, b] = PARTY_COLORS.iter()
        .find(|(name, _)| *name == party)
        .map_or(GREY, |&(_, rgb)| rgb);
    Rgba::new(r, g, b, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn major_parties_have_fixed_colors() {
        assert_eq!(party_color("Australian Labor Party", DEFAULT_ALPHA).components(), [255, 0, 0, 160]);
        assert_eq!(party_color("Australian Labor Party (State of Queensland)", DEFAULT_ALPHA).components(), [255, 0, 0, 160]);
        assert_eq!(party_color("Liberal", DEFAULT_ALPHA).components(), [0, 0, 255, 160]);
        assert_eq!(party_color("The Nationals", DEFAULT_ALPHA).components(), [0, 0, 255, 160]);
        assert_eq!(party_color("CLP - The Territory Party", DEFAULT_ALPHA).components(), [0, 0, 255, 160]);
        assert_eq!(party_color("The Greens", DEFAULT_ALPHA).components(), [0, 255, 0, 160]);
        assert_eq!(party_color("Palmer United Party", DEFAULT_ALPHA).components(), [255, 255, 0, 160]);
    }

    #[test]
    fn unmapped_names_are_grey() {
        for party in ["Independent", "", "liberal", "Katter's Australian Party", "\u{1F5F3}"] {
            assert_eq!(party_color(party, DEFAULT_ALPHA).components(), [84, 84, 84, 160]);
        }
    }

    #[test]
    fn alpha_is_applied_uniformly() {
        assert_eq!(party_color("Liberal", 255).a, 255);
        assert_eq!(party_color("Independent", 10).a, 10);
        assert_eq!(Rgba::unknown(160).components(), [255, 255, 255, 160]);
    }

    #[test]
    fn displays_as_css() {
        assert_eq!(Rgba::new(255, 0, 0, 255).to_string(), "rgba(255,0,0,1.000)");
    }
}
