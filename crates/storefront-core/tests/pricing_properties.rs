//! End-to-end pricing checks across catalog, coupon book, cart and composer.

use storefront_core::coupon::apply_coupon;
use storefront_core::discount::resolve_discount_rate;
use storefront_core::pricing::compute_final_price;
use storefront_core::{
    Cart, Catalog, Coupon, CouponBook, CouponDiscount, DiscountRate, DiscountTier, DiscountType,
    Money, NewCoupon, NewProduct, NoticeLog, Severity,
};

fn coupon(discount: CouponDiscount) -> Coupon {
    Coupon {
        code: "C".to_string(),
        name: "C".to_string(),
        discount,
    }
}

#[test]
fn final_price_stays_within_raw_subtotal() {
    let tiers = [
        DiscountTier::new(3, DiscountRate::from_percent(12.5)),
        DiscountTier::new(1, DiscountRate::from_percent(3.0)),
        DiscountTier::new(7, DiscountRate::FULL),
    ];
    let coupons = [
        None,
        Some(coupon(CouponDiscount::Amount(0))),
        Some(coupon(CouponDiscount::Amount(777))),
        Some(coupon(CouponDiscount::Amount(100_000))),
        Some(coupon(CouponDiscount::Percentage(33))),
        Some(coupon(CouponDiscount::Percentage(100))),
    ];

    for unit_price in [0, 1, 99, 1_000, 12_345] {
        for quantity in 1..=9 {
            for c in &coupons {
                let price =
                    compute_final_price(Money::from_units(unit_price), quantity, &tiers, c.as_ref());
                let raw = unit_price * quantity;

                assert!(price.final_price.units() >= 0);
                assert!(price.final_price.units() <= raw);
                assert_eq!(price.raw_subtotal.units(), raw);
                assert_eq!(
                    price.subtotal,
                    price.raw_subtotal - price.quantity_discount_amount
                );
                assert!(price.coupon_reduction_amount <= price.subtotal);
            }
        }
    }
}

#[test]
fn documented_examples() {
    assert!(resolve_discount_rate(&[], 5).is_zero());

    let tiers = [
        DiscountTier::new(10, DiscountRate::from_fraction(0.05)),
        DiscountTier::new(5, DiscountRate::from_fraction(0.2)),
    ];
    assert_eq!(resolve_discount_rate(&tiers, 12), DiscountRate::from_fraction(0.2));

    let amount = coupon(CouponDiscount::Amount(5_000));
    assert_eq!(apply_coupon(Money::from_units(1_000), Some(&amount)).units(), 1_000);

    let percent = coupon(CouponDiscount::Percentage(10));
    assert_eq!(apply_coupon(Money::from_units(10_000), Some(&percent)).units(), 1_000);
}

#[test]
fn admin_flow_to_checkout() {
    let log = NoticeLog::new();
    let mut catalog = Catalog::new();
    let mut coupons = CouponBook::new();

    let id = catalog
        .add_product(
            NewProduct {
                name: "Product 1".to_string(),
                price: 1_000,
                stock: 10_000,
                description: None,
            },
            &log,
        )
        .unwrap();
    catalog.add_discount(&id, 10, 10.0, &log).unwrap();

    coupons
        .add_coupon(
            NewCoupon {
                code: "percent10".to_string(),
                name: "10% off".to_string(),
                discount_type: DiscountType::Percentage,
                discount_value: 10,
            },
            &log,
        )
        .unwrap();
    coupons
        .add_coupon(
            NewCoupon {
                code: "BIG".to_string(),
                name: "Big".to_string(),
                discount_type: DiscountType::Amount,
                discount_value: 150_000,
            },
            &log,
        )
        .unwrap();

    let notices = log.drain();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| n.severity == Severity::Error));
    assert_eq!(catalog.get(&id).unwrap().stock, 9_999);

    let mut cart = Cart::new();
    cart.add_item(catalog.get(&id).unwrap()).unwrap();
    cart.update_quantity(&id, 12).unwrap();

    let totals = cart.totals(Some(coupons.get("PERCENT10").unwrap()));
    assert_eq!(totals.total_before_discount.units(), 12_000);
    assert_eq!(totals.quantity_discount.units(), 1_200);
    assert_eq!(totals.subtotal.units(), 10_800);
    assert_eq!(totals.coupon_reduction.units(), 1_080);
    assert_eq!(totals.total_after_discount.units(), 9_720);

    let again = cart.totals(Some(coupons.get("percent10").unwrap()));
    assert_eq!(totals, again);
}

#[test]
fn oversized_prices_are_capped_before_reaching_the_cart() {
    let mut catalog = Catalog::new();
    let log = NoticeLog::new();

    let mut ids = Vec::new();
    for name in ["A", "B"] {
        let id = catalog
            .add_product(
                NewProduct {
                    name: name.to_string(),
                    price: i64::MAX,
                    stock: 9_999,
                    description: None,
                },
                &log,
            )
            .unwrap();
        ids.push(id);
    }
    assert_eq!(log.drain().len(), 2);

    let mut cart = Cart::new();
    for id in &ids {
        cart.add_item(catalog.get(id).unwrap()).unwrap();
        cart.update_quantity(id, 9_999).unwrap();
    }

    let expected = storefront_core::MAX_PRICE * 9_999 * 2;
    let totals = cart.totals(None);
    assert_eq!(totals.total_before_discount.units(), expected);
    assert_eq!(totals.total_after_discount.units(), expected);
}
