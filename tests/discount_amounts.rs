//! Integration tests for discount amounts

use rust_decimal::{Decimal, dec};
use rusty_money::{Money, iso::AED};
use testresult::TestResult;

use souq::{
    calculator::{DiscountRule, calculate_discount, fraction_from_points},
    tiers::DiscountTier,
    welcome::WelcomeDiscount,
};

fn totals() -> impl Iterator<Item = Decimal> {
    [
        dec!(0),
        dec!(0.01),
        dec!(1),
        dec!(9.99),
        dec!(49.5),
        dec!(100),
        dec!(333.33),
        dec!(1250),
        dec!(99999.99),
    ]
    .into_iter()
}

#[test]
fn percentage_discounts_stay_within_total_and_cap() -> TestResult {
    for percent in [dec!(1), dec!(12.5), dec!(50), dec!(99), dec!(100)] {
        for cap in [None, Some(dec!(0)), Some(dec!(25)), Some(dec!(1000))] {
            for total in totals() {
                let rule = DiscountRule::Percentage {
                    percent: fraction_from_points(percent),
                    cap,
                };
                let discount = *calculate_discount(&rule, &Money::from_decimal(total, AED))?
                    .amount();

                assert!(discount >= Decimal::ZERO, "{percent}% of {total}");
                assert!(discount <= total, "{percent}% of {total}");

                if let Some(cap) = cap {
                    assert!(discount <= cap, "{percent}% of {total} cap {cap}");
                }
            }
        }
    }

    Ok(())
}

#[test]
fn cash_discounts_are_value_clamped_to_total() -> TestResult {
    for value in [dec!(0.5), dec!(10), dec!(50), dec!(500)] {
        for total in totals() {
            let rule = DiscountRule::for_tier(&DiscountTier::Cash(value), None);
            let discount = *calculate_discount(&rule, &Money::from_decimal(total, AED))?.amount();

            assert_eq!(discount, value.min(total), "{value} off {total}");
        }
    }

    Ok(())
}

#[test]
fn twenty_percent_of_five_hundred() -> TestResult {
    let tier = DiscountTier::Percentage(dec!(20));
    let total = Money::from_decimal(dec!(500), AED);

    let uncapped = calculate_discount(&DiscountRule::for_tier(&tier, None), &total)?;
    let capped = calculate_discount(&DiscountRule::for_tier(&tier, Some(dec!(80))), &total)?;

    assert_eq!(*uncapped.amount(), dec!(100));
    assert_eq!(*capped.amount(), dec!(80));

    Ok(())
}

#[test]
fn welcome_percent_is_bounded_by_maximum_discount() -> TestResult {
    let rule = DiscountRule::for_welcome(&WelcomeDiscount::Percent {
        percent: dec!(50),
        maximum_discount: dec!(100),
    });

    let discount = calculate_discount(&rule, &Money::from_decimal(dec!(300), AED))?;

    assert_eq!(*discount.amount(), dec!(100));

    Ok(())
}
