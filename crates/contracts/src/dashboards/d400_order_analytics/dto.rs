use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Сколько месяцев показывает тренд
pub const TREND_MONTHS: usize = 6;

/// Сколько позиций в рейтинге товаров
pub const TOP_ITEMS_LIMIT: usize = 5;

/// Сводная статистика по набору заказов.
/// Пересчитывается целиком из текущего списка, суммы не форматируются.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_orders: usize,
    pub total_revenue: f64,
    /// Заказы в статусе `pending`
    pub pending_orders: usize,
    /// Заказы в статусе `delivered` или `completed`
    pub completed_orders: usize,
    /// Заказы с датой в текущих календарных сутках
    pub today_orders: usize,
    /// Выручка за текущий календарный месяц
    pub month_revenue: f64,
    /// Статус -> количество заказов
    pub status_distribution: BTreeMap<String, usize>,
    /// Способ оплаты -> количество заказов
    pub payment_method_distribution: BTreeMap<String, usize>,
    /// Не более [`TOP_ITEMS_LIMIT`] позиций по убыванию количества
    pub top_products: Vec<TopItem>,
    /// Ровно [`TREND_MONTHS`] месяцев, от старого к текущему
    pub monthly_trends: Vec<MonthlyTrend>,
}

/// Позиция рейтинга товаров/услуг
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub item_name: String,
    /// Суммарное заказанное количество
    pub quantity: f64,
    pub revenue: f64,
}

/// Точка месячного тренда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    /// Период в формате "YYYY-MM"
    pub period: String,
    pub orders: usize,
    pub revenue: f64,
}

impl MonthlyTrend {
    pub fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            period: format!("{:04}-{:02}", year, month),
            orders: 0,
            revenue: 0.0,
        }
    }
}
