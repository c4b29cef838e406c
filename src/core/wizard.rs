use thiserror::Error;

use super::allocation::{RiskProfile, profile_for};
use super::generator::{DEFAULT_BASELINE, GeneratorError, generate_series};
use super::random::RandomSource;
use super::types::{RiskLevel, SeriesCollection};

/// Steps of the investment journey, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyStep {
    ChooseRisk,
    ReviewAllocation,
    Invest,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum JourneyError {
    #[error("generate a growth series before moving past risk selection")]
    SeriesNotGenerated,
    #[error("already at the final step")]
    AtFinalStep,
    #[error("already at the first step")]
    AtFirstStep,
    #[error(transparent)]
    Generator(#[from] GeneratorError),
}

/// State machine behind the multi-step wizard.
///
/// The generated curves are cached under an explicit generation token:
/// only `regenerate` (the user's regenerate affordance) or the first
/// `ensure_series` (view activation) compute anything. Changing the selected
/// risk level or moving between steps never touches the cached series, so
/// the rendered curves cannot flicker on unrelated state changes.
pub struct JourneyController {
    step: JourneyStep,
    selected: RiskLevel,
    baseline: f64,
    generation_token: u64,
    cache: Option<SeriesCollection>,
}

impl JourneyController {
    pub fn new() -> Self {
        Self {
            step: JourneyStep::ChooseRisk,
            selected: RiskLevel::DEFAULT,
            baseline: DEFAULT_BASELINE,
            generation_token: 0,
            cache: None,
        }
    }

    /// Override the baseline the curves grow from. Validated on generation.
    pub fn with_baseline(mut self, baseline: f64) -> Self {
        self.baseline = baseline;
        self
    }

    pub fn step(&self) -> JourneyStep {
        self.step
    }

    pub fn selected_risk_level(&self) -> RiskLevel {
        self.selected
    }

    /// Pure state update: switches which curve is emphasized and which
    /// profile copy is shown. Never regenerates.
    pub fn select_risk_level(&mut self, level: RiskLevel) {
        self.selected = level;
    }

    /// Profile copy and allocation mix for the currently selected level.
    pub fn profile(&self) -> RiskProfile {
        profile_for(self.selected)
    }

    pub fn series(&self) -> Option<&SeriesCollection> {
        self.cache.as_ref()
    }

    /// Token identifying the current generation; bumps only when curves are
    /// actually recomputed.
    pub fn generation_token(&self) -> u64 {
        self.generation_token
    }

    /// Returns the cached series, generating it first if this is the initial
    /// activation. Subsequent calls are cache hits regardless of selection
    /// changes in between.
    pub fn ensure_series<R>(&mut self, source: &mut R) -> Result<&SeriesCollection, GeneratorError>
    where
        R: RandomSource + ?Sized,
    {
        if self.cache.is_none() {
            return self.regenerate(source);
        }
        Ok(self.cache.as_ref().expect("cache checked above"))
    }

    /// Explicit regeneration: recomputes the curves and bumps the token.
    pub fn regenerate<R>(&mut self, source: &mut R) -> Result<&SeriesCollection, GeneratorError>
    where
        R: RandomSource + ?Sized,
    {
        let series = generate_series(self.baseline, source)?;
        self.generation_token += 1;
        Ok(self.cache.insert(series))
    }

    /// Move to the next step. Leaving risk selection requires generated
    /// curves; later steps only need the earlier ones completed.
    pub fn advance(&mut self) -> Result<JourneyStep, JourneyError> {
        self.step = match self.step {
            JourneyStep::ChooseRisk => {
                if self.cache.is_none() {
                    return Err(JourneyError::SeriesNotGenerated);
                }
                JourneyStep::ReviewAllocation
            }
            JourneyStep::ReviewAllocation => JourneyStep::Invest,
            JourneyStep::Invest => return Err(JourneyError::AtFinalStep),
        };
        Ok(self.step)
    }

    /// Move to the previous step. The cached series survives.
    pub fn back(&mut self) -> Result<JourneyStep, JourneyError> {
        self.step = match self.step {
            JourneyStep::ChooseRisk => return Err(JourneyError::AtFirstStep),
            JourneyStep::ReviewAllocation => JourneyStep::ChooseRisk,
            JourneyStep::Invest => JourneyStep::ReviewAllocation,
        };
        Ok(self.step)
    }
}

impl Default for JourneyController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::SeededSource;

    fn controller_with_series(seed: u64) -> JourneyController {
        let mut wizard = JourneyController::new();
        wizard
            .ensure_series(&mut SeededSource::from_seed(seed))
            .expect("generation succeeds");
        wizard
    }

    #[test]
    fn ensure_series_generates_once_then_caches() {
        let mut wizard = JourneyController::new();
        assert!(wizard.series().is_none());
        assert_eq!(wizard.generation_token(), 0);

        let first = wizard
            .ensure_series(&mut SeededSource::from_seed(3))
            .unwrap()
            .clone();
        assert_eq!(wizard.generation_token(), 1);

        // A different source on a cache hit must not change anything.
        let second = wizard
            .ensure_series(&mut SeededSource::from_seed(99))
            .unwrap()
            .clone();
        assert_eq!(first, second);
        assert_eq!(wizard.generation_token(), 1);
    }

    #[test]
    fn selecting_a_level_never_alters_generated_values() {
        let mut wizard = controller_with_series(11);
        let before = wizard.series().unwrap().clone();
        let token = wizard.generation_token();

        for level in RiskLevel::all() {
            wizard.select_risk_level(level);
            assert_eq!(wizard.selected_risk_level(), level);
            assert_eq!(wizard.series().unwrap(), &before);
        }
        assert_eq!(wizard.generation_token(), token);
    }

    #[test]
    fn regenerate_bumps_token_and_recomputes() {
        let mut wizard = controller_with_series(5);
        let first = wizard.series().unwrap().clone();

        let second = wizard
            .regenerate(&mut SeededSource::from_seed(6))
            .unwrap()
            .clone();
        assert_eq!(wizard.generation_token(), 2);
        assert_ne!(first, second);

        // Same seed reproduces the same curves; the token still advances
        // because a generation happened.
        let third = wizard
            .regenerate(&mut SeededSource::from_seed(6))
            .unwrap()
            .clone();
        assert_eq!(wizard.generation_token(), 3);
        assert_eq!(second, third);
    }

    #[test]
    fn cannot_leave_risk_step_without_curves() {
        let mut wizard = JourneyController::new();
        assert_eq!(wizard.advance(), Err(JourneyError::SeriesNotGenerated));
        assert_eq!(wizard.step(), JourneyStep::ChooseRisk);
    }

    #[test]
    fn steps_advance_in_order_and_stop_at_the_end() {
        let mut wizard = controller_with_series(1);
        assert_eq!(wizard.advance(), Ok(JourneyStep::ReviewAllocation));
        assert_eq!(wizard.advance(), Ok(JourneyStep::Invest));
        assert_eq!(wizard.advance(), Err(JourneyError::AtFinalStep));
    }

    #[test]
    fn stepping_back_preserves_the_cache() {
        let mut wizard = controller_with_series(8);
        let series = wizard.series().unwrap().clone();
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.back(), Ok(JourneyStep::ReviewAllocation));
        assert_eq!(wizard.back(), Ok(JourneyStep::ChooseRisk));
        assert_eq!(wizard.back(), Err(JourneyError::AtFirstStep));
        assert_eq!(wizard.series().unwrap(), &series);
        assert_eq!(wizard.generation_token(), 1);
    }

    #[test]
    fn invalid_baseline_surfaces_as_generator_error() {
        let mut wizard = JourneyController::new().with_baseline(-10.0);
        let result = wizard.ensure_series(&mut SeededSource::from_seed(1));
        assert!(matches!(result, Err(GeneratorError::InvalidBaseline(_))));
        assert!(wizard.series().is_none());
        assert_eq!(wizard.generation_token(), 0);
    }

    #[test]
    fn profile_follows_the_selected_level() {
        let mut wizard = JourneyController::new();
        wizard.select_risk_level(RiskLevel::MAX);
        assert_eq!(wizard.profile().level, RiskLevel::MAX);
        assert_eq!(wizard.profile().label, "Aggressive");
        wizard.select_risk_level(RiskLevel::MIN);
        assert_eq!(wizard.profile().label, "Cautious");
    }
}
