use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::{ConfigError, OrderConfig};
use crate::domain::menu::{MenuCatalog, MenuCategory, MenuItem};
use crate::event_sourcing::core::{Aggregate, EventEnvelope};
use crate::event_sourcing::store::EventLog;
use crate::metrics::OrderMetrics;

use super::aggregate::OrderState;
use super::commands::OrderCommand;
use super::errors::OrderError;
use super::events::OrderEvent;
use super::value_objects::{OrderSnapshot, OrderStatus};

// ============================================================================
// Order Accumulator
// ============================================================================
//
// Orchestrates: Command → OrderState → Events → EventLog → Observers
//
// Single-threaded: every method takes `&mut self` and runs to completion.
// Callers sharing an accumulator must serialize access themselves.
//
// ============================================================================

/// Called synchronously after every successful mutation
pub type OrderObserver = Box<dyn FnMut(&EventEnvelope<OrderEvent>, &OrderState) + Send>;

pub struct OrderAccumulator {
    catalog: Arc<dyn MenuCatalog + Send + Sync>,
    state: OrderState,
    history: EventLog<OrderEvent>,
    observers: Vec<OrderObserver>,
    metrics: Option<Arc<OrderMetrics>>,
}

impl OrderAccumulator {
    /// Accumulator with the default 8% tax rate
    pub fn new(catalog: Arc<dyn MenuCatalog + Send + Sync>) -> Self {
        Self::with_tax_rate(catalog, OrderConfig::default().tax_rate)
    }

    pub fn with_config(
        catalog: Arc<dyn MenuCatalog + Send + Sync>,
        config: &OrderConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_tax_rate(catalog, config.tax_rate))
    }

    fn with_tax_rate(catalog: Arc<dyn MenuCatalog + Send + Sync>, tax_rate: Decimal) -> Self {
        let id = Uuid::now_v7();
        tracing::debug!(order_id = %id, tax_rate = %tax_rate, "Starting order");

        Self {
            catalog,
            state: OrderState::new(id, tax_rate),
            history: EventLog::new(id),
            observers: Vec::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<OrderMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn subscribe<F>(&mut self, observer: F)
    where
        F: FnMut(&EventEnvelope<OrderEvent>, &OrderState) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Handle any order command
    pub fn execute(&mut self, command: OrderCommand) -> Result<(), OrderError> {
        tracing::trace!(order_id = %self.state.id, command = command.name(), "Handling command");

        let events = match self.state.handle_command(&command, self.catalog.as_ref()) {
            Ok(events) => events,
            Err(e) => {
                self.record_rejection(&e);
                return Err(e);
            }
        };

        self.commit(events);
        Ok(())
    }

    /// Select `item_id` for `category`, replacing any earlier selection.
    ///
    /// Unknown ids fail with [`OrderError::ItemNotFound`], prices beyond
    /// `MAX_ITEM_PRICE` with [`OrderError::PriceOutOfRange`]; either way the
    /// order is untouched. Tax and total are not recomputed.
    pub fn set_category(&mut self, category: MenuCategory, item_id: &str) -> Result<(), OrderError> {
        match self.state.decide_selection(category, item_id, self.catalog.as_ref()) {
            Ok(event) => {
                self.commit(vec![event]);
                Ok(())
            }
            Err(e) => {
                self.record_rejection(&e);
                Err(e)
            }
        }
    }

    pub fn set_entree(&mut self, item_id: &str) -> Result<(), OrderError> {
        self.set_category(MenuCategory::Entree, item_id)
    }

    pub fn set_side(&mut self, item_id: &str) -> Result<(), OrderError> {
        self.set_category(MenuCategory::Side, item_id)
    }

    pub fn set_accompaniment(&mut self, item_id: &str) -> Result<(), OrderError> {
        self.set_category(MenuCategory::Accompaniment, item_id)
    }

    /// Derive tax and total from the current subtotal
    pub fn calculate_tax_and_total(&mut self) {
        let event = self.state.decide_totals();
        self.commit(vec![event]);
    }

    /// Clear every selection and zero all figures
    pub fn reset_order(&mut self) {
        let event = self.state.decide_reset();
        self.commit(vec![event]);
    }

    fn commit(&mut self, events: Vec<OrderEvent>) {
        let correlation_id = Uuid::new_v4();
        let appended = self.history.append_events(correlation_id, events);
        let mut last_reset = None;

        for envelope in appended {
            if matches!(envelope.event_data, OrderEvent::Reset(_)) {
                last_reset = Some(envelope.sequence_number);
            }

            self.state.apply_event(&envelope.event_data);
            log_applied(&envelope.event_data, &self.state);

            if let Some(metrics) = &self.metrics {
                record_applied(metrics, &envelope.event_data, &self.state);
            }

            for observer in self.observers.iter_mut() {
                observer(envelope, &self.state);
            }
        }

        // A reset makes everything before it irrelevant to the current state
        if let Some(sequence_number) = last_reset {
            self.history.discard_before(sequence_number);
        }
    }

    fn record_rejection(&self, error: &OrderError) {
        let category = error.category();
        match error {
            OrderError::ItemNotFound { item_id, .. } => tracing::warn!(
                order_id = %self.state.id,
                category = %category,
                item = %item_id,
                "Rejected selection of unknown menu item"
            ),
            OrderError::PriceOutOfRange { item_id, price, .. } => tracing::warn!(
                order_id = %self.state.id,
                category = %category,
                item = %item_id,
                price = %price,
                "Rejected selection with unsupported price"
            ),
        }
        if let Some(metrics) = &self.metrics {
            metrics.record_selection_failure(category.as_str());
        }
    }

    // ------------------------------------------------------------------------
    // Observed state
    // ------------------------------------------------------------------------

    pub fn state(&self) -> &OrderState {
        &self.state
    }

    pub fn selection(&self, category: MenuCategory) -> Option<&MenuItem> {
        self.state.selection(category)
    }

    pub fn entree(&self) -> Option<&MenuItem> {
        self.state.entree()
    }

    pub fn side(&self) -> Option<&MenuItem> {
        self.state.side()
    }

    pub fn accompaniment(&self) -> Option<&MenuItem> {
        self.state.accompaniment()
    }

    pub fn subtotal(&self) -> Decimal {
        self.state.subtotal()
    }

    pub fn tax(&self) -> Decimal {
        self.state.tax()
    }

    pub fn total(&self) -> Decimal {
        self.state.total()
    }

    pub fn tax_rate(&self) -> Decimal {
        self.state.tax_rate()
    }

    pub fn status(&self) -> OrderStatus {
        self.state.status()
    }

    pub fn snapshot(&self) -> OrderSnapshot {
        OrderSnapshot::from_state(&self.state)
    }

    pub fn catalog(&self) -> &dyn MenuCatalog {
        self.catalog.as_ref()
    }

    /// Events applied since construction or, once reset, since the latest
    /// reset (which is kept as the first entry)
    pub fn history(&self) -> &[EventEnvelope<OrderEvent>] {
        self.history.events()
    }

    /// Rebuild the order from its retained history alone
    pub fn replay(&self) -> OrderState {
        let mut initial = OrderState::new(self.state.id, self.state.tax_rate());
        initial.version = self.history.first_version().map_or(0, |first| first - 1);
        OrderState::load_from_events(initial, self.history.events())
    }
}

fn log_applied(event: &OrderEvent, state: &OrderState) {
    match event {
        OrderEvent::ItemSelected(e) => tracing::debug!(
            order_id = %state.id,
            category = %e.category,
            item = %e.item.id,
            price = %e.item.price,
            subtotal = %state.subtotal(),
            "Item selected"
        ),
        OrderEvent::TotalsCalculated(e) => tracing::info!(
            order_id = %state.id,
            subtotal = %e.subtotal,
            tax = %e.tax,
            total = %e.total,
            "Calculated tax and total"
        ),
        OrderEvent::Reset(_) => tracing::info!(order_id = %state.id, "Order reset"),
    }
}

fn record_applied(metrics: &OrderMetrics, event: &OrderEvent, state: &OrderState) {
    match event {
        OrderEvent::ItemSelected(e) => {
            let subtotal = state.subtotal().to_f64().unwrap_or_default();
            metrics.record_selection(e.category.as_str(), subtotal);
        }
        OrderEvent::TotalsCalculated(_) => metrics.record_tax_calculation(),
        OrderEvent::Reset(_) => metrics.record_reset(),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu::{default_menu, InMemoryMenuCatalog};
    use crate::event_sourcing::core::DomainEvent;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    fn accumulator() -> OrderAccumulator {
        OrderAccumulator::new(Arc::new(default_menu()))
    }

    #[test]
    fn test_default_menu_order() {
        let mut order = accumulator();
        order.set_entree("pasta").unwrap();
        order.set_side("soup").unwrap();
        order.set_accompaniment("bread").unwrap();

        assert_eq!(order.subtotal(), dec!(9.00));
        assert_eq!(order.status(), OrderStatus::Complete);
        assert_eq!(order.entree().unwrap().name, "Mushroom Pasta");

        order.calculate_tax_and_total();
        assert_eq!(order.tax(), dec!(18.72));
        assert_eq!(order.total(), dec!(27.72));
        assert_eq!(order.status(), OrderStatus::Finalized);
    }

    #[test]
    fn test_execute_routes_commands() {
        let mut order = accumulator();
        order
            .execute(OrderCommand::SelectItem {
                category: MenuCategory::Side,
                item_id: "rice".to_string(),
            })
            .unwrap();
        order.execute(OrderCommand::CalculateTaxAndTotal).unwrap();
        assert_eq!(order.total(), dec!(4.62));

        order.execute(OrderCommand::ResetOrder).unwrap();
        assert_eq!(order.total(), Decimal::ZERO);
        assert_eq!(order.status(), OrderStatus::Empty);
    }

    #[test]
    fn test_unknown_item_leaves_order_untouched() {
        let mut order = accumulator();
        order.set_side("salad").unwrap();
        let before = order.state().clone();

        let err = order.set_side("fries").unwrap_err();
        assert_eq!(
            err,
            OrderError::ItemNotFound {
                category: MenuCategory::Side,
                item_id: "fries".to_string(),
            }
        );
        assert_eq!(order.state(), &before);
        assert_eq!(order.history().len(), 1);
    }

    #[test]
    fn test_observers_see_latest_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut order = accumulator();
        order.subscribe(move |envelope, state| {
            sink.lock()
                .unwrap()
                .push((envelope.event_data.event_type(), envelope.sequence_number, state.subtotal()));
        });

        order.set_entree("chili").unwrap();
        assert!(order.set_entree("tofu").is_err());
        order.set_side("potatoes").unwrap();
        order.calculate_tax_and_total();
        order.reset_order();

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                ("ItemSelected", 1, dec!(4.00)),
                ("ItemSelected", 2, dec!(6.00)),
                ("TotalsCalculated", 3, dec!(6.00)),
                ("OrderReset", 4, Decimal::ZERO),
            ]
        );
    }

    #[test]
    fn test_replay_matches_live_state() {
        let mut order = accumulator();
        order.set_entree("skillet").unwrap();
        order.set_entree("cauliflower").unwrap();
        order.set_accompaniment("berries").unwrap();
        order.calculate_tax_and_total();
        order.reset_order();
        order.set_side("salad").unwrap();

        assert_eq!(&order.replay(), order.state());
        assert_eq!(order.state().version(), 6);
        assert_eq!(order.history().len(), 2);
        assert_eq!(order.history()[0].event_type, "OrderReset");
        assert_eq!(order.history()[0].sequence_number, 5);
    }

    #[test]
    fn test_history_stays_bounded_across_resets() {
        let mut order = accumulator();

        for _ in 0..10_000 {
            order.set_entree("chili").unwrap();
            order.reset_order();
        }

        assert_eq!(order.history().len(), 1);
        assert_eq!(order.state().version(), 20_000);
        assert_eq!(order.history()[0].sequence_number, 20_000);
        assert_eq!(&order.replay(), order.state());

        order.set_side("rice").unwrap();
        assert_eq!(order.history()[1].sequence_number, 20_001);
        assert_eq!(&order.replay(), order.state());
    }

    #[test]
    fn test_oversized_price_is_rejected_and_counted() {
        struct PassThroughCatalog(MenuItem);

        impl MenuCatalog for PassThroughCatalog {
            fn lookup(&self, id: &str) -> Option<&MenuItem> {
                (id == self.0.id).then_some(&self.0)
            }
        }

        let catalog = PassThroughCatalog(MenuItem::new("big", "Big", "", Decimal::MAX, MenuCategory::Entree));
        let metrics = Arc::new(OrderMetrics::new().unwrap());
        let mut order = OrderAccumulator::new(Arc::new(catalog)).with_metrics(metrics.clone());

        let err = order.set_entree("big").unwrap_err();
        assert!(matches!(err, OrderError::PriceOutOfRange { .. }));
        assert!(order.entree().is_none());
        assert!(order.history().is_empty());
        assert_eq!(metrics.selection_failures_total.with_label_values(&["entree"]).get(), 1);

        order.calculate_tax_and_total();
        assert_eq!(order.total(), Decimal::ZERO);
    }

    #[test]
    fn test_with_config_applies_tax_rate() {
        let config = OrderConfig::default().with_tax_rate(dec!(0.10));
        let mut order = OrderAccumulator::with_config(Arc::new(default_menu()), &config).unwrap();
        order.set_entree("chili").unwrap();
        order.calculate_tax_and_total();

        assert_eq!(order.tax_rate(), dec!(0.10));
        assert_eq!(order.tax(), dec!(8.40));
        assert_eq!(order.total(), dec!(12.40));
    }

    #[test]
    fn test_with_config_rejects_negative_rate() {
        let config = OrderConfig::default().with_tax_rate(dec!(-0.08));
        let result = OrderAccumulator::with_config(Arc::new(default_menu()), &config);
        assert!(matches!(result, Err(ConfigError::NegativeTaxRate(_))));
    }

    #[test]
    fn test_metrics_are_recorded() {
        let metrics = Arc::new(OrderMetrics::new().unwrap());
        let mut order = accumulator().with_metrics(metrics.clone());

        order.set_entree("chili").unwrap();
        order.set_side("rice").unwrap();
        let _ = order.set_side("fries");
        order.calculate_tax_and_total();

        assert_eq!(metrics.selections_total.with_label_values(&["entree"]).get(), 1);
        assert_eq!(metrics.selections_total.with_label_values(&["side"]).get(), 1);
        assert_eq!(metrics.selection_failures_total.with_label_values(&["side"]).get(), 1);
        assert_eq!(metrics.tax_calculations_total.get(), 1);
        assert_eq!(metrics.subtotal.get(), 5.5);

        order.reset_order();
        assert_eq!(metrics.resets_total.get(), 1);
        assert_eq!(metrics.subtotal.get(), 0.0);
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = InMemoryMenuCatalog::new(vec![
            MenuItem::new("burrito", "Burrito", "", dec!(5.00), MenuCategory::Entree),
        ])
        .unwrap();
        let mut order = OrderAccumulator::new(Arc::new(catalog));

        order.set_entree("burrito").unwrap();
        assert!(order.set_entree("pasta").is_err());
        assert_eq!(order.subtotal(), dec!(5.00));
        assert!(order.catalog().lookup("burrito").is_some());
    }

    #[test]
    fn test_snapshot_formats_money() {
        let mut order = accumulator();
        order.set_entree("pasta").unwrap();
        order.set_accompaniment("pickles").unwrap();
        order.calculate_tax_and_total();

        let snapshot = order.snapshot();
        assert_eq!(snapshot.entree.as_deref(), Some("Mushroom Pasta"));
        assert_eq!(snapshot.side, None);
        assert_eq!(snapshot.accompaniment.as_deref(), Some("Pickled Veggies"));
        assert_eq!(snapshot.subtotal, "$6.00");
        assert_eq!(snapshot.tax, "$12.48");
        assert_eq!(snapshot.total, "$18.48");
        assert_eq!(snapshot.status, OrderStatus::Finalized);
    }
}
