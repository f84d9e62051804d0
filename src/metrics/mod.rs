use prometheus::{Encoder, Gauge, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for order activity
// ============================================================================
//
// Provides metrics for:
// - Selections per category, and rejected selections
// - Tax/total calculations
// - Order resets
// - The live subtotal
//
// ============================================================================

pub struct OrderMetrics {
    registry: Registry,

    pub selections_total: IntCounterVec,
    pub selection_failures_total: IntCounterVec,
    pub tax_calculations_total: IntCounter,
    pub resets_total: IntCounter,
    pub subtotal: Gauge,
}

impl OrderMetrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let selections_total = IntCounterVec::new(
            Opts::new("order_selections_total", "Total successful item selections"),
            &["category"],
        )?;
        registry.register(Box::new(selections_total.clone()))?;

        let selection_failures_total = IntCounterVec::new(
            Opts::new("order_selection_failures_total", "Selections rejected for unknown items"),
            &["category"],
        )?;
        registry.register(Box::new(selection_failures_total.clone()))?;

        let tax_calculations_total = IntCounter::new(
            "order_tax_calculations_total",
            "Total tax and total calculations",
        )?;
        registry.register(Box::new(tax_calculations_total.clone()))?;

        let resets_total = IntCounter::new("order_resets_total", "Total order resets")?;
        registry.register(Box::new(resets_total.clone()))?;

        let subtotal = Gauge::new("order_subtotal", "Current order subtotal")?;
        registry.register(Box::new(subtotal.clone()))?;

        Ok(Self {
            registry,
            selections_total,
            selection_failures_total,
            tax_calculations_total,
            resets_total,
            subtotal,
        })
    }

    pub fn record_selection(&self, category: &str, subtotal: f64) {
        self.selections_total.with_label_values(&[category]).inc();
        self.subtotal.set(subtotal);
    }

    pub fn record_selection_failure(&self, category: &str) {
        self.selection_failures_total.with_label_values(&[category]).inc();
    }

    pub fn record_tax_calculation(&self) {
        self.tax_calculations_total.inc();
    }

    pub fn record_reset(&self) {
        self.resets_total.inc();
        self.subtotal.set(0.0);
    }

    /// Text exposition format of every registered metric
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
