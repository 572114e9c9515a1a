use contracts::domain::common::Order;

/// Объединить заказы товаров и услуг в один список, новые сверху.
///
/// Ничего не отбрасывает и не схлопывает: длина результата равна сумме длин.
/// При равных датах сохраняется порядок `product_orders ++ service_orders`.
pub fn merge_orders(product_orders: &[Order], service_orders: &[Order]) -> Vec<Order> {
    let mut merged: Vec<Order> = product_orders
        .iter()
        .chain(service_orders)
        .cloned()
        .collect();
    sort_by_date_desc(&mut merged);
    merged
}

/// Стабильная сортировка по `order_date` по убыванию
pub fn sort_by_date_desc(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
}
