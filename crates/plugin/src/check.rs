//! Check assembly: measured metrics in, plugin output out.

use crate::config::{MetricConfig, ThresholdConfig};
use crate::message::Message;
use crate::output::PluginOutput;
use crate::types::ServiceState;
use perfdata::{PerformanceDatum, PerformanceError, PerformanceSet, Uom};
use thresholds::{RangeError, Threshold};
use tracing::{debug, info, warn};

/// Source of measured values for one check.
///
/// Implementations do the resource-specific work (reading sysfs, calling an
/// API, running a command) and hand back raw metrics.
pub trait Resource {
    /// Short name, printed upper-cased at the start of the status line.
    fn name(&self) -> &str;

    /// Measure the resource.
    fn probe(&self) -> common::Result<Vec<Metric>>;
}

/// A measured value together with how to judge and report it.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    label: String,
    value: Option<f64>,
    uom: Uom,
    threshold: Threshold,
    min: Option<f64>,
    max: Option<f64>,
}

/// Verdict and performance datum for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub state: ServiceState,
    pub datum: PerformanceDatum,
}

impl Metric {
    /// A measured metric. Non-finite values count as unmeasured.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            value: Some(value).filter(|v| v.is_finite()),
            ..Self::unknown(label)
        }
    }

    /// A metric that could not be measured; it evaluates to UNKNOWN.
    pub fn unknown(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            uom: Uom::None,
            threshold: Threshold::default(),
            min: None,
            max: None,
        }
    }

    pub fn with_uom(mut self, uom: impl Into<Uom>) -> Self {
        self.uom = uom.into();
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    pub fn threshold(&self) -> &Threshold {
        &self.threshold
    }

    /// Apply configured settings; configured thresholds replace the
    /// metric's own, other fields only fill in when set.
    pub fn configure(mut self, config: &MetricConfig) -> Result<Self, RangeError> {
        self.threshold = config.threshold()?;
        if let Some(uom) = &config.uom {
            self.uom = uom.clone();
        }
        self.min = config.min.or(self.min);
        self.max = config.max.or(self.max);
        Ok(self)
    }

    pub fn state(&self) -> ServiceState {
        match self.value {
            Some(value) => self.threshold.get_status(value).into(),
            None => ServiceState::Unknown,
        }
    }

    pub fn evaluate(&self) -> Result<Evaluation, PerformanceError> {
        let mut datum = match self.value {
            Some(value) => PerformanceDatum::new(&self.label, value)?,
            None => PerformanceDatum::unknown(&self.label)?,
        }
        .with_uom(self.uom.clone())
        .with_threshold(&self.threshold);
        if let Some(min) = self.min {
            datum = datum.with_min(min);
        }
        if let Some(max) = self.max {
            datum = datum.with_max(max);
        }

        Ok(Evaluation {
            state: self.state(),
            datum,
        })
    }

    fn describe(&self) -> String {
        match self.value {
            Some(value) => format!("{} is {}{}", self.label, value, self.uom),
            None => format!("{} is unknown", self.label),
        }
    }
}

/// Metrics and messages that make up one plugin run.
#[derive(Debug, Clone, Default)]
pub struct Check {
    name: String,
    metrics: Vec<Metric>,
    messages: Vec<Message>,
    details: Vec<String>,
}

impl Check {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = Metric>) -> Self {
        self.metrics.extend(metrics);
        self
    }

    /// Summary text. Replaces the generated list of alerting metrics.
    pub fn with_message(mut self, message: impl Into<Message>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// Extra line of long output.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate every metric and build the output.
    pub fn output(&self) -> Result<PluginOutput, PerformanceError> {
        let mut state = ServiceState::Ok;
        let mut perfdata = PerformanceSet::new();
        let mut problems = Vec::new();

        for metric in &self.metrics {
            let evaluation = metric.evaluate()?;
            debug!(label = metric.label(), state = %evaluation.state, "evaluated metric");
            if evaluation.state != ServiceState::Ok {
                problems.push(metric.describe());
            }
            state = state.merge(evaluation.state);
            perfdata.add(evaluation.datum);
        }

        let summary = if !self.messages.is_empty() {
            Message::Sequence(self.messages.iter().map(|m| m.join(", ")).collect())
        } else if !problems.is_empty() {
            Message::Sequence(problems)
        } else {
            Message::Scalar(format!("{} metrics within thresholds", self.metrics.len()))
        };

        let mut output = PluginOutput::new(
            state,
            format!("{} {} - {}", self.name.to_uppercase(), state, summary.join(", ")),
        )
        .with_perfdata(perfdata);
        for line in &self.details {
            output = output.with_long_output(line.clone());
        }
        Ok(output)
    }
}

/// Runs a [`Resource`] and turns every failure into an UNKNOWN result.
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: Option<ThresholdConfig>,
}

impl Runner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Judge probed metrics by configured thresholds instead of their own.
    pub fn with_config(mut self, config: ThresholdConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn run<R: Resource + ?Sized>(&self, resource: &R) -> PluginOutput {
        let name = resource.name();
        match self.try_run(resource) {
            Ok(output) => {
                info!(resource = name, state = %output.state, "check finished");
                output
            }
            Err(err) => {
                warn!(resource = name, error = %err, "check failed");
                PluginOutput::new(
                    ServiceState::Unknown,
                    format!("{} {} - {}", name.to_uppercase(), ServiceState::Unknown, err),
                )
            }
        }
    }

    fn try_run<R: Resource + ?Sized>(&self, resource: &R) -> common::Result<PluginOutput> {
        let mut metrics = resource.probe()?;
        if let Some(config) = &self.config {
            metrics = metrics
                .into_iter()
                .map(|metric| match config.get(metric.label()) {
                    Some(settings) => metric.configure(settings),
                    None => Ok(metric),
                })
                .collect::<Result<Vec<_>, _>>()?;
        }
        Ok(Check::new(resource.name()).with_metrics(metrics).output()?)
    }
}
