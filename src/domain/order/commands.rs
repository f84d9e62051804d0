use crate::domain::menu::MenuCategory;

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    SelectItem {
        category: MenuCategory,
        item_id: String,
    },
    CalculateTaxAndTotal,
    ResetOrder,
}

impl OrderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::SelectItem { .. } => "SelectItem",
            OrderCommand::CalculateTaxAndTotal => "CalculateTaxAndTotal",
            OrderCommand::ResetOrder => "ResetOrder",
        }
    }
}
