use crate::core::linear::LinearScale;
use crate::core::ordinal::OrdinalScale;
use crate::error::AxisResult;
use crate::ticks::draw_strategy::TickDrawStrategy;
use crate::ticks::formatter::{TickFormatter, TickLabelCache};
use crate::ticks::tick::{AxisOrientation, Tick, TickHint};

/// Everything a numeric tick provider needs for one draw cycle.
///
/// The caller owns the formatter and the label cache across cycles; the
/// scale is mutable so providers may extend its viewport domain to the
/// chosen tick bounds.
pub struct TickRequest<'a> {
    pub scale: &'a mut LinearScale,
    pub formatter: &'a dyn TickFormatter<f64>,
    pub label_cache: &'a mut TickLabelCache,
    pub draw_strategy: &'a dyn TickDrawStrategy<f64>,
    pub orientation: AxisOrientation,
    pub viewport_extension_enabled: bool,
    pub hint: Option<TickHint<f64>>,
}

impl TickRequest<'_> {
    /// Builds decorated ticks for the given values at current scale
    /// positions.
    pub fn build_ticks(&mut self, values: &[f64]) -> Vec<Tick<f64>> {
        let mut ticks: Vec<Tick<f64>> = values
            .iter()
            .map(|&value| Tick {
                value,
                label: self.label_cache.format(value, self.formatter),
                location: self.scale.apply(value),
                label_offset: 0.0,
            })
            .collect();
        self.draw_strategy.decorate_ticks(&mut ticks);
        ticks
    }
}

/// Produces candidate axis ticks from a scale and formatter.
pub trait TickProvider {
    fn get_ticks(&self, request: &mut TickRequest<'_>) -> AxisResult<Vec<Tick<f64>>>;
}

/// One fixed tick value with an optional label override.
#[derive(Debug, Clone, PartialEq)]
pub struct TickSpec {
    pub value: f64,
    pub label: Option<String>,
}

impl TickSpec {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    #[must_use]
    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(label.into()),
        }
    }
}

/// Emits exactly the configured tick values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticTickProvider {
    specs: Vec<TickSpec>,
}

impl StaticTickProvider {
    #[must_use]
    pub fn new(specs: Vec<TickSpec>) -> Self {
        Self { specs }
    }

    #[must_use]
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            specs: values.into_iter().map(TickSpec::new).collect(),
        }
    }
}

impl TickProvider for StaticTickProvider {
    fn get_ticks(&self, request: &mut TickRequest<'_>) -> AxisResult<Vec<Tick<f64>>> {
        let values: Vec<f64> = self.specs.iter().map(|spec| spec.value).collect();
        let mut ticks = request.build_ticks(&values);
        for (tick, spec) in ticks.iter_mut().zip(&self.specs) {
            if let Some(label) = &spec.label {
                tick.label = label.clone();
            }
        }
        Ok(ticks)
    }
}

/// Static tick values that thin themselves out when labels collide.
///
/// Keeps every n-th tick for growing strides until the draw strategy stops
/// reporting collisions; the sparsest subset wins if none fits.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AutoAdjustingStaticTickProvider {
    specs: Vec<TickSpec>,
}

impl AutoAdjustingStaticTickProvider {
    #[must_use]
    pub fn new(specs: Vec<TickSpec>) -> Self {
        Self { specs }
    }

    #[must_use]
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            specs: values.into_iter().map(TickSpec::new).collect(),
        }
    }
}

impl TickProvider for AutoAdjustingStaticTickProvider {
    fn get_ticks(&self, request: &mut TickRequest<'_>) -> AxisResult<Vec<Tick<f64>>> {
        if self.specs.is_empty() {
            return Ok(Vec::new());
        }

        let mut sparsest = Vec::new();
        for stride in 1..=self.specs.len() {
            let subset: Vec<TickSpec> = self.specs.iter().step_by(stride).cloned().collect();
            let mut ticks = StaticTickProvider::new(subset).get_ticks(request)?;
            let report = request.draw_strategy.collides(&ticks, request.orientation);
            if !report.ticks_collide {
                return Ok(ticks);
            }
            std::mem::swap(&mut sparsest, &mut ticks);
        }
        Ok(sparsest)
    }
}

/// Two ticks pinned to the viewport's domain endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndPointsTickProvider;

impl TickProvider for EndPointsTickProvider {
    fn get_ticks(&self, request: &mut TickRequest<'_>) -> AxisResult<Vec<Tick<f64>>> {
        let window = request.scale.viewport_domain();
        if window.is_degenerate() {
            return Ok(request.build_ticks(&[window.min()]));
        }
        Ok(request.build_ticks(&[window.min(), window.max()]))
    }
}

/// One tick per ordinal domain key, centered on its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrdinalTickProvider;

impl OrdinalTickProvider {
    pub fn get_ticks(
        &self,
        scale: &OrdinalScale,
        draw_strategy: &dyn TickDrawStrategy<String>,
    ) -> AxisResult<Vec<Tick<String>>> {
        let mut ticks: Vec<Tick<String>> = scale
            .domain_keys()
            .map(|key| Tick {
                value: key.to_owned(),
                label: key.to_owned(),
                location: scale.apply(key),
                label_offset: 0.0,
            })
            .collect();
        draw_strategy.decorate_ticks(&mut ticks);
        Ok(ticks)
    }
}
