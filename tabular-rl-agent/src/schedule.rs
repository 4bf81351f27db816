//! Per-episode rate schedules

/// Trait for schedules (learning rate, exploration rate)
pub trait Schedule: Send + Sync {
    /// Get value at episode `t`
    fn value(&self, t: usize) -> f64;
}

/// Exponential decay schedule recomputed from the episode index
///
/// The decay factor is derived so that after `total_episodes` episodes the
/// value has moved from `init` to `final`: `decay = (final/init)^(1/total)`.
/// `value(t)` is a pure function of `t`, so replaying an episode index
/// always yields the same rate.
#[derive(Debug, Clone, Copy)]
pub struct DecaySchedule {
    /// Initial value at episode 0
    pub init: f64,
    /// Per-episode multiplicative decay factor
    pub decay: f64,
}

impl DecaySchedule {
    /// Create a schedule that decays from `init` to `final_value` over
    /// `total_episodes` episodes
    pub fn over_episodes(
        init: f64,
        final_value: f64,
        total_episodes: usize,
    ) -> tabular_rl_core::Result<Self> {
        if total_episodes == 0 {
            return Err(tabular_rl_core::RLError::Config(
                "schedule requires a positive episode count".into(),
            ));
        }
        if !(init > 0.0) || !(final_value > 0.0) {
            return Err(tabular_rl_core::RLError::Config(format!(
                "schedule endpoints must be positive, got init={init} final={final_value}"
            )));
        }
        let decay = (final_value / init).powf(1.0 / total_episodes as f64);
        Ok(Self { init, decay })
    }
}

impl Schedule for DecaySchedule {
    fn value(&self, t: usize) -> f64 {
        self.init * self.decay.powf(t as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn starts_at_init() {
        let schedule = DecaySchedule::over_episodes(1.0, 0.1, 1000).unwrap();
        assert_relative_eq!(schedule.value(0), 1.0);
    }

    #[test]
    fn reaches_final_after_total_episodes() {
        let schedule = DecaySchedule::over_episodes(0.1, 0.01, 500).unwrap();
        assert_relative_eq!(schedule.value(500), 0.01, max_relative = 1e-10);
    }

    #[test]
    fn last_episode_is_one_decay_step_before_final() {
        let schedule = DecaySchedule::over_episodes(1.0, 0.1, 100).unwrap();
        assert_relative_eq!(
            schedule.value(99) * schedule.decay,
            0.1,
            max_relative = 1e-10
        );
    }

    #[test]
    fn value_is_idempotent_in_the_index() {
        let schedule = DecaySchedule::over_episodes(1.0, 0.1, 100).unwrap();
        assert_eq!(schedule.value(37), schedule.value(37));
    }

    #[test]
    fn decay_is_monotone() {
        let schedule = DecaySchedule::over_episodes(1.0, 0.1, 100).unwrap();
        for t in 0..100 {
            assert!(schedule.value(t + 1) < schedule.value(t));
        }
    }

    #[test]
    fn rejects_zero_episodes() {
        assert!(DecaySchedule::over_episodes(1.0, 0.1, 0).is_err());
    }

    #[test]
    fn rejects_non_positive_endpoints() {
        assert!(DecaySchedule::over_episodes(0.0, 0.1, 10).is_err());
        assert!(DecaySchedule::over_episodes(1.0, -0.1, 10).is_err());
    }
}
