/// Scouting bucket for a projected points-per-game figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictTier {
    AllStarPotential,
    SolidRotationPlayer,
    EndOfBenchPlayer,
    BelowNbaLevel,
}

impl VerdictTier {
    pub fn message(self) -> &'static str {
        match self {
            VerdictTier::AllStarPotential => "future All-Star potential",
            VerdictTier::SolidRotationPlayer => "solid rotation player",
            VerdictTier::EndOfBenchPlayer => "end-of-bench player",
            VerdictTier::BelowNbaLevel => "NBA level not reached",
        }
    }
}

/// Thresholds are strict: a projection sitting exactly on a boundary
/// falls into the lower tier.
pub fn classify(score: f64) -> VerdictTier {
    if score > 15.0 {
        VerdictTier::AllStarPotential
    } else if score > 8.0 {
        VerdictTier::SolidRotationPlayer
    } else if score > 1.0 {
        VerdictTier::EndOfBenchPlayer
    } else {
        VerdictTier::BelowNbaLevel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_fall_into_the_lower_tier() {
        assert_eq!(classify(15.0), VerdictTier::SolidRotationPlayer);
        assert_eq!(classify(8.0), VerdictTier::EndOfBenchPlayer);
        assert_eq!(classify(1.0), VerdictTier::BelowNbaLevel);
    }

    #[test]
    fn open_intervals_map_to_the_upper_tier() {
        assert_eq!(classify(15.01), VerdictTier::AllStarPotential);
        assert_eq!(classify(30.0), VerdictTier::AllStarPotential);
        assert_eq!(classify(8.01), VerdictTier::SolidRotationPlayer);
        assert_eq!(classify(1.01), VerdictTier::EndOfBenchPlayer);
        assert_eq!(classify(0.0), VerdictTier::BelowNbaLevel);
        assert_eq!(classify(-4.0), VerdictTier::BelowNbaLevel);
    }

    #[test]
    fn classify_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(classify(9.5), VerdictTier::SolidRotationPlayer);
        }
    }
}
