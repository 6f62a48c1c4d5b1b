use serde::Serialize;

use super::types::Rating;

pub fn compute_rating(final_balance: f64, average_annual_income: f64) -> Rating {
    if average_annual_income <= 0.0 {
        return Rating::D;
    }

    let ratio = final_balance / average_annual_income;
    if ratio >= 5.0 {
        Rating::S
    } else if ratio >= 2.0 {
        Rating::A
    } else if ratio >= 0.0 {
        Rating::B
    } else if ratio >= -1.0 {
        Rating::C
    } else {
        Rating::D
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeerBand {
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtiesPlus,
}

impl PeerBand {
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=29 => PeerBand::Twenties,
            30..=39 => PeerBand::Thirties,
            40..=49 => PeerBand::Forties,
            50..=59 => PeerBand::Fifties,
            _ => PeerBand::SixtiesPlus,
        }
    }
}

/// Average household net worth by age decade, man-yen.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PeerAverages {
    pub twenties: f64,
    pub thirties: f64,
    pub forties: f64,
    pub fifties: f64,
    pub sixties_plus: f64,
}

impl Default for PeerAverages {
    fn default() -> Self {
        Self {
            twenties: 121.0,
            thirties: 462.0,
            forties: 713.0,
            fifties: 1_063.0,
            sixties_plus: 1_819.0,
        }
    }
}

impl PeerAverages {
    pub fn for_band(&self, band: PeerBand) -> f64 {
        match band {
            PeerBand::Twenties => self.twenties,
            PeerBand::Thirties => self.thirties,
            PeerBand::Forties => self.forties,
            PeerBand::Fifties => self.fifties,
            PeerBand::SixtiesPlus => self.sixties_plus,
        }
    }
}

const NEUTRAL_PERCENTILE: u8 = 50;
const PERCENTILE_POINTS_PER_SD: f64 = 15.0;

pub fn peer_percentile(final_balance: f64, current_age: u32) -> u8 {
    peer_percentile_with(&PeerAverages::default(), final_balance, current_age)
}

/// Crude single-parameter rank: assumes a normal spread with a standard
/// deviation of one third of the band mean, scaled to 15 points per deviation
/// around 50 and clamped to 1..=99. It is not a real percentile.
pub fn peer_percentile_with(table: &PeerAverages, final_balance: f64, current_age: u32) -> u8 {
    let peer_average = table.for_band(PeerBand::for_age(current_age));
    if peer_average <= 0.0 {
        return NEUTRAL_PERCENTILE;
    }

    let std_dev = peer_average / 3.0;
    let percentile = (final_balance - peer_average) / std_dev * PERCENTILE_POINTS_PER_SD
        + f64::from(NEUTRAL_PERCENTILE);
    percentile.round().clamp(1.0, 99.0) as u8
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerComparison {
    pub band: PeerBand,
    pub peer_average: f64,
    pub difference: f64,
    pub percentile: u8,
    /// Share of peers ranked above, the "top X%" figure.
    pub top_percent: u8,
}

pub fn peer_comparison(final_balance: f64, current_age: u32) -> PeerComparison {
    let table = PeerAverages::default();
    let band = PeerBand::for_age(current_age);
    let peer_average = table.for_band(band);
    let percentile = peer_percentile_with(&table, final_balance, current_age);
    PeerComparison {
        band,
        peer_average,
        difference: final_balance - peer_average,
        percentile,
        top_percent: 100 - percentile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, proptest};

    fn flat_table(value: f64) -> PeerAverages {
        PeerAverages {
            twenties: value,
            thirties: value,
            forties: value,
            fifties: value,
            sixties_plus: value,
        }
    }

    #[test]
    fn rating_boundaries() {
        assert_eq!(compute_rating(1_800.0, 360.0), Rating::S);
        assert_eq!(compute_rating(1_799.99, 360.0), Rating::A);
        assert_eq!(compute_rating(720.0, 360.0), Rating::A);
        assert_eq!(compute_rating(719.99, 360.0), Rating::B);
        assert_eq!(compute_rating(0.0, 360.0), Rating::B);
        assert_eq!(compute_rating(-0.01, 360.0), Rating::C);
        assert_eq!(compute_rating(-360.0, 360.0), Rating::C);
        assert_eq!(compute_rating(-360.01, 360.0), Rating::D);
    }

    #[test]
    fn non_positive_income_is_always_d() {
        assert_eq!(compute_rating(1_000_000.0, 0.0), Rating::D);
        assert_eq!(compute_rating(1_000_000.0, -5.0), Rating::D);
    }

    #[test]
    fn age_bands_split_on_decades() {
        assert_eq!(PeerBand::for_age(0), PeerBand::Twenties);
        assert_eq!(PeerBand::for_age(29), PeerBand::Twenties);
        assert_eq!(PeerBand::for_age(30), PeerBand::Thirties);
        assert_eq!(PeerBand::for_age(49), PeerBand::Forties);
        assert_eq!(PeerBand::for_age(59), PeerBand::Fifties);
        assert_eq!(PeerBand::for_age(60), PeerBand::SixtiesPlus);
        assert_eq!(PeerBand::for_age(99), PeerBand::SixtiesPlus);
    }

    #[test]
    fn percentile_is_fifty_at_the_peer_average() {
        let table = flat_table(300.0);
        assert_eq!(peer_percentile_with(&table, 300.0, 35), 50);
        assert_eq!(peer_percentile_with(&table, 400.0, 35), 65);
        assert_eq!(peer_percentile_with(&table, 200.0, 35), 35);
    }

    #[test]
    fn percentile_is_clamped() {
        let table = flat_table(300.0);
        assert_eq!(peer_percentile_with(&table, 100_000.0, 35), 99);
        assert_eq!(peer_percentile_with(&table, -100_000.0, 35), 1);
    }

    #[test]
    fn missing_peer_average_is_neutral() {
        assert_eq!(peer_percentile_with(&flat_table(0.0), 5_000.0, 45), 50);
    }

    #[test]
    fn comparison_reports_band_difference_and_top_share() {
        let comparison = peer_comparison(462.0, 33);
        assert_eq!(comparison.band, PeerBand::Thirties);
        assert_eq!(comparison.percentile, 50);
        assert_eq!(comparison.top_percent, 50);
        assert!(comparison.difference.abs() < 1e-9);

        let behind = peer_comparison(-1_000.0, 65);
        assert_eq!(behind.band, PeerBand::SixtiesPlus);
        assert_eq!(behind.percentile, 1);
        assert_eq!(behind.top_percent, 99);
        assert!(behind.difference < 0.0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_percentile_stays_in_range_and_is_monotonic(
            balance in -50_000i32..50_000,
            bump in 0i32..5_000,
            age in 0u32..110
        ) {
            let lower = peer_percentile(balance as f64, age);
            let upper = peer_percentile((balance + bump) as f64, age);
            prop_assert!((1..=99).contains(&lower));
            prop_assert!((1..=99).contains(&upper));
            prop_assert!(lower <= upper);
        }
    }
}
