use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Money columns are `NUMERIC(10,2)`: every stored amount is below 10^8.
pub fn amount_ceiling() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// A requested line with the product price captured at order time.
#[derive(Debug, Clone, Copy)]
pub struct LineQuote {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub shipping: Decimal,
    pub total: Decimal,
}

/// Line subtotal is `quantity * unit_price`; the order total adds the
/// shipping price, zero when no shipping option was chosen.
pub fn price_order(quotes: &[LineQuote], shipping: Option<Decimal>) -> PricedOrder {
    let lines: Vec<PricedLine> = quotes
        .iter()
        .map(|quote| PricedLine {
            product_id: quote.product_id,
            quantity: quote.quantity,
            unit_price: quote.unit_price,
            subtotal: Decimal::from(quote.quantity) * quote.unit_price,
        })
        .collect();
    let shipping = shipping.unwrap_or(Decimal::ZERO);
    let total = lines.iter().map(|line| line.subtotal).sum::<Decimal>() + shipping;
    PricedOrder {
        lines,
        shipping,
        total,
    }
}

impl PricedOrder {
    /// Fails when a line subtotal or the total would not fit a money column.
    pub fn ensure_storable(&self) -> AppResult<()> {
        let ceiling = amount_ceiling();
        if let Some(line) = self.lines.iter().find(|line| line.subtotal >= ceiling) {
            return Err(AppError::bad_request(format!(
                "Subtotal for product {} exceeds the maximum order amount",
                line.product_id
            )));
        }
        if self.total >= ceiling {
            return Err(AppError::bad_request("Order total exceeds the maximum order amount"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: &str) -> Decimal {
        value.parse().unwrap()
    }

    fn quote(quantity: i32, unit_price: &str) -> LineQuote {
        LineQuote {
            product_id: Uuid::new_v4(),
            quantity,
            unit_price: dec(unit_price),
        }
    }

    #[test]
    fn two_lines_plus_shipping() {
        let priced = price_order(&[quote(2, "10.00"), quote(1, "3.50")], Some(dec("5.00")));
        assert_eq!(priced.lines[0].subtotal, dec("20.00"));
        assert_eq!(priced.lines[1].subtotal, dec("3.50"));
        assert_eq!(priced.total, dec("28.50"));
    }

    #[test]
    fn no_shipping_counts_as_zero() {
        let priced = price_order(&[quote(3, "1.25")], None);
        assert_eq!(priced.shipping, Decimal::ZERO);
        assert_eq!(priced.total, dec("3.75"));
    }

    #[test]
    fn lines_keep_order_and_unit_price() {
        let quotes = [quote(1, "9.99"), quote(4, "0.50")];
        let priced = price_order(&quotes, Some(Decimal::ZERO));
        for (line, quote) in priced.lines.iter().zip(quotes.iter()) {
            assert_eq!(line.product_id, quote.product_id);
            assert_eq!(line.unit_price, quote.unit_price);
            assert_eq!(line.subtotal, Decimal::from(quote.quantity) * quote.unit_price);
        }
        assert_eq!(priced.total, dec("11.99"));
    }

    #[test]
    fn oversized_amounts_are_rejected() {
        let line = price_order(&[quote(2, "60000000.00")], None);
        assert!(matches!(line.ensure_storable(), Err(AppError::BadRequest(_))));

        // Each line fits, the sum with shipping does not.
        let total = price_order(
            &[quote(1, "60000000.00"), quote(1, "39999999.99")],
            Some(dec("0.01")),
        );
        assert!(matches!(total.ensure_storable(), Err(AppError::BadRequest(_))));

        let edge = price_order(&[quote(1, "99999999.99")], None);
        assert!(edge.ensure_storable().is_ok());
    }
}
