//! Quotation pricing aggregation.
//!
//! Stateless arithmetic over quotation line items. Every function takes its inputs by reference
//! or value and touches nothing else, so calls can run on any thread without coordination.
//!
//! Products and sums are carried out on exact scaled integers and only turned back into a
//! `Decimal` at the end. A result that cannot be represented without rounding is rejected, so the
//! same components always give the same total or the same error, in any order.

use crate::component::QuotationComponent;
use crate::error::ValidationError;
use crate::quotation::Quotation;
use rust_decimal::Decimal;

/// Derives line totals and quotation totals from components.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuotationAggregator;

impl QuotationAggregator {
    /// Computes `quantity × unit_price` for one line item.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::NonPositiveQuantity`] if `quantity <= 0`
    /// - [`ValidationError::NegativeUnitPrice`] if `unit_price < 0`
    /// - [`ValidationError::NegativeLength`] if `length_metres < 0`
    /// - [`ValidationError::LengthOnNonCable`] if a length is given for a non-cable category
    /// - [`ValidationError::Overflow`] if the product does not fit a `Decimal`
    /// - [`ValidationError::PrecisionLoss`] if the product would have to be rounded
    pub fn line_total(component: &QuotationComponent) -> Result<Decimal, ValidationError> {
        if component.quantity <= 0 {
            return Err(ValidationError::NonPositiveQuantity {
                quantity: component.quantity,
            });
        }
        if component.unit_price < Decimal::ZERO {
            return Err(ValidationError::NegativeUnitPrice {
                unit_price: component.unit_price,
            });
        }

        if let Some(length) = component.length_metres {
            if length < Decimal::ZERO {
                return Err(ValidationError::NegativeLength { length });
            }
            if !component.category.is_cable() {
                return Err(ValidationError::LengthOnNonCable {
                    category: component.category,
                });
            }
        }

        const CONTEXT: &str = "line total";
        let price = component.unit_price.normalize();
        let mantissa = price
            .mantissa()
            .checked_mul(i128::from(component.quantity))
            .ok_or(ValidationError::Overflow { context: CONTEXT })?;

        exact_decimal(mantissa, price.scale(), CONTEXT)
    }

    /// Sums the line totals of `components` plus `installation_charge` (absent means zero).
    ///
    /// The result does not depend on the order of `components`. Every term is brought to the
    /// finest scale among them and added as an integer, so no intermediate sum is rounded.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeInstallationCharge`] for a negative charge, the
    /// first error raised by [`QuotationAggregator::line_total`], or
    /// [`ValidationError::Overflow`] / [`ValidationError::PrecisionLoss`] when the exact total
    /// does not fit a `Decimal`.
    pub fn quotation_total(
        components: &[QuotationComponent],
        installation_charge: Option<Decimal>,
    ) -> Result<Decimal, ValidationError> {
        let charge = installation_charge.unwrap_or(Decimal::ZERO);
        if charge < Decimal::ZERO {
            return Err(ValidationError::NegativeInstallationCharge { charge });
        }

        let mut terms = Vec::with_capacity(components.len() + 1);
        terms.push(charge.normalize());
        for component in components {
            terms.push(Self::line_total(component)?.normalize());
        }

        const CONTEXT: &str = "quotation total";
        let scale = terms.iter().map(Decimal::scale).max().unwrap_or(0);
        let mut sum: i128 = 0;
        for term in &terms {
            let mantissa = 10i128
                .checked_pow(scale - term.scale())
                .and_then(|factor| term.mantissa().checked_mul(factor))
                .ok_or(ValidationError::PrecisionLoss { context: CONTEXT })?;
            sum = sum
                .checked_add(mantissa)
                .ok_or(ValidationError::PrecisionLoss { context: CONTEXT })?;
        }

        exact_decimal(sum, scale, CONTEXT)
    }

    /// Returns `quotation` with its total price refreshed from its components and installation
    /// charge. Every other field is left as it was.
    ///
    /// This is the only way a quotation's total price gets written.
    ///
    /// # Errors
    ///
    /// Propagates any [`ValidationError`] from [`QuotationAggregator::quotation_total`]; the
    /// quotation is dropped in that case and the caller keeps its own copy if needed.
    pub fn recompute(mut quotation: Quotation) -> Result<Quotation, ValidationError> {
        let total =
            Self::quotation_total(quotation.components(), quotation.installation_charge())?;
        quotation.set_total_price(total);

        tracing::debug!("recomputed total for {}: {}", quotation.id(), total);

        Ok(quotation)
    }
}

/// Builds the `Decimal` equal to `mantissa × 10^-scale`, dropping only trailing zeros.
fn exact_decimal(
    mut mantissa: i128,
    mut scale: u32,
    context: &'static str,
) -> Result<Decimal, ValidationError> {
    loop {
        if let Ok(value) = Decimal::try_from_i128_with_scale(mantissa, scale) {
            return Ok(value);
        }
        if scale == 0 || mantissa / 10i128.pow(scale) > Decimal::MAX.mantissa() {
            return Err(ValidationError::Overflow { context });
        }
        if mantissa % 10 != 0 {
            return Err(ValidationError::PrecisionLoss { context });
        }
        mantissa /= 10;
        scale -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use solarq_ids::Identifier;
    use solarq_types::{CapacityClass, ComponentCategory, NonEmptyText, SystemTopology};

    fn item(category: ComponentCategory, quantity: i64, unit_price: Decimal) -> QuotationComponent {
        QuotationComponent::new(
            category,
            NonEmptyText::new("Generic").unwrap(),
            quantity,
            unit_price,
        )
    }

    fn panel(quantity: i64, unit_price: Decimal) -> QuotationComponent {
        item(ComponentCategory::SolarPanel, quantity, unit_price)
    }

    fn quotation() -> Quotation {
        Quotation::new(
            Identifier::parse("QUOT/00007/C0042").unwrap(),
            NonEmptyText::new("vendor-42").unwrap(),
            CapacityClass::Kw3,
            SystemTopology::OnGrid,
        )
        .unwrap()
    }

    #[test]
    fn test_line_total_multiplies_quantity_and_price() {
        assert_eq!(
            QuotationAggregator::line_total(&panel(4, dec!(1500))).unwrap(),
            dec!(6000)
        );
        assert_eq!(
            QuotationAggregator::line_total(&panel(3, dec!(19.99))).unwrap(),
            dec!(59.97)
        );
    }

    #[test]
    fn test_line_total_zero_price_is_zero() {
        assert_eq!(
            QuotationAggregator::line_total(&panel(5, dec!(0))).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_line_total_rejects_zero_quantity() {
        assert_eq!(
            QuotationAggregator::line_total(&panel(0, dec!(10))),
            Err(ValidationError::NonPositiveQuantity { quantity: 0 })
        );
    }

    #[test]
    fn test_line_total_rejects_negative_quantity() {
        assert_eq!(
            QuotationAggregator::line_total(&panel(-2, dec!(10))),
            Err(ValidationError::NonPositiveQuantity { quantity: -2 })
        );
    }

    #[test]
    fn test_line_total_rejects_negative_price() {
        assert_eq!(
            QuotationAggregator::line_total(&panel(1, dec!(-0.01))),
            Err(ValidationError::NegativeUnitPrice {
                unit_price: dec!(-0.01)
            })
        );
    }

    #[test]
    fn test_line_total_reports_overflow() {
        let huge = panel(i64::MAX, Decimal::MAX);

        assert_eq!(
            QuotationAggregator::line_total(&huge),
            Err(ValidationError::Overflow {
                context: "line total"
            })
        );
    }

    #[test]
    fn test_line_total_rejects_rounded_product() {
        // 79228162514264337593543950335 is the largest Decimal mantissa.
        let price = Decimal::from_i128_with_scale(79_228_162_514_264_337_593_543_950_335, 28);

        assert_eq!(
            QuotationAggregator::line_total(&panel(3, price)),
            Err(ValidationError::PrecisionLoss {
                context: "line total"
            })
        );
    }

    #[test]
    fn test_line_total_keeps_exact_product_at_precision_limit() {
        let price = dec!(0.5000000000000000000000000000);

        assert_eq!(
            QuotationAggregator::line_total(&panel(2, price)).unwrap(),
            Decimal::ONE
        );
    }

    #[test]
    fn test_line_total_checks_length() {
        let cable = item(ComponentCategory::DcCable, 1, dec!(40)).with_length_metres(dec!(30));
        assert_eq!(QuotationAggregator::line_total(&cable).unwrap(), dec!(40));

        let negative = item(ComponentCategory::AcCable, 1, dec!(40)).with_length_metres(dec!(-1));
        assert_eq!(
            QuotationAggregator::line_total(&negative),
            Err(ValidationError::NegativeLength { length: dec!(-1) })
        );

        let inverter = item(ComponentCategory::Inverter, 1, dec!(2000)).with_length_metres(dec!(5));
        match QuotationAggregator::line_total(&inverter) {
            Err(ValidationError::LengthOnNonCable { category }) => {
                assert_eq!(category, ComponentCategory::Inverter)
            }
            _ => panic!("Expected LengthOnNonCable error"),
        }
    }

    #[test]
    fn test_quotation_total_example() {
        let components = vec![
            panel(4, dec!(1500)),
            item(ComponentCategory::Inverter, 1, dec!(2000)),
        ];

        let total = QuotationAggregator::quotation_total(&components, Some(dec!(500))).unwrap();

        assert_eq!(total, dec!(8500));
    }

    #[test]
    fn test_quotation_total_absent_charge_is_zero() {
        let components = vec![panel(2, dec!(100)), panel(1, dec!(50))];

        assert_eq!(
            QuotationAggregator::quotation_total(&components, None).unwrap(),
            QuotationAggregator::quotation_total(&components, Some(Decimal::ZERO)).unwrap()
        );
    }

    #[test]
    fn test_quotation_total_with_zero_charge_is_sum_of_lines() {
        let components = vec![
            panel(10, dec!(12500.75)),
            item(ComponentCategory::DcCable, 3, dec!(42.10)),
            item(ComponentCategory::Earthing, 1, dec!(0)),
        ];

        let sum: Decimal = components
            .iter()
            .map(|c| QuotationAggregator::line_total(c).unwrap())
            .sum();

        assert_eq!(
            QuotationAggregator::quotation_total(&components, Some(Decimal::ZERO)).unwrap(),
            sum
        );
    }

    #[test]
    fn test_quotation_total_is_order_independent() {
        let components = vec![
            panel(4, dec!(1500.10)),
            item(ComponentCategory::Inverter, 1, dec!(2000)),
            item(ComponentCategory::Battery, 2, dec!(8999.99)),
            item(ComponentCategory::AcCable, 7, dec!(0.333)),
        ];
        let expected =
            QuotationAggregator::quotation_total(&components, Some(dec!(250))).unwrap();

        let mut reversed = components.clone();
        reversed.reverse();
        let mut rotated = components.clone();
        rotated.rotate_left(2);

        for permutation in [reversed, rotated] {
            assert_eq!(
                QuotationAggregator::quotation_total(&permutation, Some(dec!(250))).unwrap(),
                expected
            );
        }
    }

    #[test]
    fn test_quotation_total_is_order_independent_at_precision_limit() {
        let big = panel(1, dec!(1000000000000000000000));
        let small = panel(1, dec!(0.00000005));

        let big_first = vec![big.clone(), small.clone(), small.clone()];
        let small_first = vec![small.clone(), small, big];

        let expected = dec!(1000000000000000000000.0000001);
        assert_eq!(
            QuotationAggregator::quotation_total(&big_first, None).unwrap(),
            expected
        );
        assert_eq!(
            QuotationAggregator::quotation_total(&small_first, None).unwrap(),
            expected
        );
    }

    #[test]
    fn test_quotation_total_rejects_rounded_sum_in_any_order() {
        let big = panel(1, dec!(1000000000000000000000));
        let tiny = panel(1, dec!(0.00000001));

        for components in [vec![big.clone(), tiny.clone()], vec![tiny, big]] {
            assert_eq!(
                QuotationAggregator::quotation_total(&components, None),
                Err(ValidationError::PrecisionLoss {
                    context: "quotation total"
                })
            );
        }
    }

    #[test]
    fn test_quotation_total_reports_overflow() {
        let components = vec![panel(1, Decimal::MAX), panel(1, Decimal::MAX)];

        assert_eq!(
            QuotationAggregator::quotation_total(&components, None),
            Err(ValidationError::Overflow {
                context: "quotation total"
            })
        );
    }

    #[test]
    fn test_quotation_total_rejects_negative_charge() {
        let components = vec![panel(1, dec!(100))];

        assert_eq!(
            QuotationAggregator::quotation_total(&components, Some(dec!(-1))),
            Err(ValidationError::NegativeInstallationCharge { charge: dec!(-1) })
        );
    }

    #[test]
    fn test_quotation_total_propagates_line_error() {
        let components = vec![panel(1, dec!(100)), panel(0, dec!(100))];

        assert_eq!(
            QuotationAggregator::quotation_total(&components, None),
            Err(ValidationError::NonPositiveQuantity { quantity: 0 })
        );
    }

    #[test]
    fn test_quotation_total_empty_is_charge() {
        assert_eq!(
            QuotationAggregator::quotation_total(&[], Some(dec!(750))).unwrap(),
            dec!(750)
        );
        assert_eq!(
            QuotationAggregator::quotation_total(&[], None).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_recompute_after_mutation_refreshes_only_total() {
        let mut q = quotation();
        q.add_component(panel(4, dec!(1500)));
        q.add_component(item(ComponentCategory::Inverter, 1, dec!(2000)));
        q.set_installation_charge(Some(dec!(500)));
        let q = QuotationAggregator::recompute(q).unwrap();
        assert_eq!(q.total_price(), Some(dec!(8500)));

        let mut mutated = q.clone();
        mutated.replace_component(0, panel(5, dec!(1500))).unwrap();
        let vendor_before = mutated.vendor_id().clone();
        let created_before = mutated.created_at();
        let updated_before = mutated.updated_at();
        let components_before = mutated.components().to_vec();

        let refreshed = QuotationAggregator::recompute(mutated).unwrap();

        assert_eq!(refreshed.total_price(), Some(dec!(10000)));
        assert_eq!(refreshed.vendor_id(), &vendor_before);
        assert_eq!(refreshed.created_at(), created_before);
        assert_eq!(refreshed.updated_at(), updated_before);
        assert_eq!(refreshed.components(), components_before.as_slice());
        assert_eq!(refreshed.id(), q.id());
    }

    #[test]
    fn test_recompute_matches_quotation_total() {
        let mut q = quotation();
        q.add_component(panel(12, dec!(1350)));
        q.add_component(item(ComponentCategory::MountingStructure, 1, dec!(8000)));
        let expected =
            QuotationAggregator::quotation_total(q.components(), q.installation_charge()).unwrap();

        let q = QuotationAggregator::recompute(q).unwrap();

        assert_eq!(q.total_price(), Some(expected));
    }

    #[test]
    fn test_recompute_rejects_invalid_component() {
        let mut q = quotation();
        q.add_component(panel(1, dec!(-5)));

        assert_eq!(
            QuotationAggregator::recompute(q).unwrap_err(),
            ValidationError::NegativeUnitPrice {
                unit_price: dec!(-5)
            }
        );
    }

    #[test]
    fn test_recompute_after_remove() {
        let mut q = quotation();
        q.add_component(panel(2, dec!(100)));
        q.add_component(panel(3, dec!(10)));
        let mut q = QuotationAggregator::recompute(q).unwrap();

        q.remove_component(0).unwrap();
        assert_eq!(q.total_price(), None);

        let q = QuotationAggregator::recompute(q).unwrap();
        assert_eq!(q.total_price(), Some(dec!(30)));
    }
}
