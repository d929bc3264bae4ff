use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;

pub type OrderId = i64;

/// The slice of an order row the checkout reads and writes.
///
/// The table itself is owned by the shop backend; only `paid` is ever
/// written from here.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: OrderId,
    pub total_amount: Decimal,
    pub paid: bool,
    pub created_at: time::PrimitiveDateTime,
}

impl OrderRecord {
    /// A fresh, unpaid order created now.
    pub fn new(id: OrderId, total_amount: Decimal) -> Self {
        let now = time::OffsetDateTime::now_utc();
        Self {
            id,
            total_amount,
            paid: false,
            created_at: time::PrimitiveDateTime::new(now.date(), now.time()),
        }
    }
}

#[derive(Debug, Clone)]
/// Fetch an order by its primary key.
pub struct GetOrderById {
    pub order_id: OrderId,
}

impl Processor<GetOrderById> for DatabaseProcessor {
    type Output = Option<OrderRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetOrderById")]
    async fn process(&self, query: GetOrderById) -> Result<Option<OrderRecord>, sqlx::Error> {
        let order = sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, total_amount, paid, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(query.order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }
}

#[derive(Debug, Clone)]
/// Set the paid flag of an order.
///
/// The update is unconditional, so concurrent duplicate callbacks all
/// converge on `paid = TRUE`. Returns `None` if the row does not exist.
pub struct MarkOrderPaid {
    pub order_id: OrderId,
}

impl Processor<MarkOrderPaid> for DatabaseProcessor {
    type Output = Option<OrderRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:MarkOrderPaid")]
    async fn process(&self, update: MarkOrderPaid) -> Result<Option<OrderRecord>, sqlx::Error> {
        let order = sqlx::query_as::<_, OrderRecord>(
            r#"
            UPDATE orders
            SET paid = TRUE
            WHERE id = $1
            RETURNING id, total_amount, paid, created_at
            "#,
        )
        .bind(update.order_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }
}
