//! Cart store behaviour across mutations, pricing and reloads.

use std::sync::Arc;

use shopfront_cache::Cache;
use shopfront_commerce::notify::Level;
use shopfront_commerce::prelude::*;

fn product(id: &str, price: i64, stock: i64) -> Product {
    Product::new(id, format!("Product {id}"), Money::inr(price), stock)
}

fn open(cache: Cache) -> (CartStore, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let store = CartStore::open(cache, StoreConfig::default(), notifier.clone()).unwrap();
    (store, notifier)
}

fn memory_store() -> (CartStore, Arc<RecordingNotifier>) {
    open(Cache::in_memory())
}

#[test]
fn flat_coupon_with_free_shipping() {
    let (mut store, _) = memory_store();
    store.add_to_cart(&product("1", 1000, 10), 2, false).unwrap();
    store.apply_coupon("FLAT500").unwrap();

    let totals = store.totals().unwrap();
    assert_eq!(totals.subtotal, Money::inr(2000));
    assert_eq!(totals.discount, Money::inr(500));
    assert_eq!(totals.shipping, Money::inr(0));
    assert_eq!(totals.total, Money::inr(1500));
}

#[test]
fn coupon_below_minimum_is_rejected() {
    let (mut store, notifier) = memory_store();
    store.add_to_cart(&product("1", 500, 10), 1, false).unwrap();
    let before = store.totals().unwrap();

    let result = store.apply_coupon("FLAT500");
    match result {
        Err(CommerceError::CouponMinimumNotMet { code, minimum, subtotal }) => {
            assert_eq!(code, "FLAT500");
            assert_eq!(minimum, Money::inr(2000));
            assert_eq!(subtotal, Money::inr(500));
        }
        other => panic!("expected CouponMinimumNotMet, got {other:?}"),
    }

    assert_eq!(store.totals().unwrap(), before);
    assert_eq!(notifier.last().unwrap().level, Level::Error);
}

#[test]
fn stock_exceeded_leaves_cart_unchanged() {
    let (mut store, _) = memory_store();
    store.add_to_cart(&product("2", 700, 10), 1, false).unwrap();
    let before = store.cart().clone();

    let result = store.add_to_cart(&product("1", 1000, 3), 5, false);
    assert!(matches!(
        result,
        Err(CommerceError::StockExceeded { requested: 5, available: 3, .. })
    ));
    assert_eq!(store.cart(), &before);
}

#[test]
fn apply_then_remove_coupon_restores_total() {
    let (mut store, _) = memory_store();
    store.add_to_cart(&product("1", 2500, 10), 3, false).unwrap();
    store.select_shipping("standard").unwrap();
    let before = store.totals().unwrap().total;

    for code in ["WELCOME10", "FLAT500", "SUPER20"] {
        store.apply_coupon(code).unwrap();
        assert!(store.totals().unwrap().total.amount < before.amount);
        store.remove_coupon().unwrap();
        assert_eq!(store.totals().unwrap().total, before);
    }
}

#[test]
fn total_is_never_negative() {
    let config = StoreConfig {
        coupons: vec![Coupon::fixed("HUGE", 10_000, 0)],
        ..StoreConfig::default()
    };
    let mut store =
        CartStore::open(Cache::in_memory(), config, Arc::new(RecordingNotifier::new())).unwrap();
    store.add_to_cart(&product("1", 99, 10), 1, false).unwrap();
    store.apply_coupon("huge").unwrap();

    let option_ids: Vec<String> = store.shipping_options().iter().map(|o| o.id.clone()).collect();
    for id in option_ids {
        store.select_shipping(&id).unwrap();
        let totals = store.totals().unwrap();
        assert!(!totals.total.is_negative());
        assert_eq!(totals.total, Money::inr(0));
    }
}

#[test]
fn update_quantity_to_zero_equals_remove() {
    let (mut a, _) = memory_store();
    let (mut b, _) = memory_store();
    for store in [&mut a, &mut b] {
        store.add_to_cart(&product("1", 1000, 10), 2, false).unwrap();
        store.add_to_cart(&product("2", 300, 10), 1, false).unwrap();
    }

    a.update_quantity(&ProductId::new("1"), 0).unwrap();
    b.remove_from_cart(&ProductId::new("1")).unwrap();
    assert_eq!(a.cart(), b.cart());
}

#[test]
fn save_for_later_then_move_back_restores_item() {
    let (mut store, notifier) = memory_store();
    store.add_to_cart(&product("1", 1000, 10), 4, false).unwrap();
    let original = store.get_item(&ProductId::new("1")).unwrap().clone();

    assert!(store.move_to_saved_for_later(&ProductId::new("1")).unwrap());
    assert!(store.is_empty());
    assert!(notifier.contains("Item saved for later"));

    assert!(store.move_to_cart(&ProductId::new("1")).unwrap());
    assert!(store.saved_for_later().is_empty());
    assert_eq!(store.get_item(&ProductId::new("1")), Some(&original));
}

#[test]
fn remove_unknown_is_noop() {
    let (mut store, _) = memory_store();
    store.add_to_cart(&product("1", 1000, 10), 1, false).unwrap();
    assert!(!store.remove_from_cart(&ProductId::new("404")).unwrap());
    assert!(!store.update_quantity(&ProductId::new("404"), 3).unwrap());
    assert!(!store.move_to_cart(&ProductId::new("404")).unwrap());
    assert_eq!(store.item_count(), 1);
}

#[test]
fn state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut store, _) = open(Cache::open(dir.path()).unwrap());
        store.add_to_cart(&product("1", 3000, 10), 2, false).unwrap();
        store.add_to_cart(&product("2", 450, 10), 1, false).unwrap();
        store.move_to_saved_for_later(&ProductId::new("2")).unwrap();
        store.select_shipping("express").unwrap();
        store.apply_coupon("SUPER20").unwrap();
    }

    let (mut reloaded, _) = open(Cache::open(dir.path()).unwrap());
    assert_eq!(reloaded.item_count(), 2);
    assert_eq!(reloaded.saved_for_later().len(), 1);
    assert_eq!(reloaded.shipping().id, "express");
    assert_eq!(reloaded.applied_coupon().unwrap().code, "SUPER20");

    let totals = reloaded.totals().unwrap();
    assert_eq!(totals.subtotal, Money::inr(6000));
    assert_eq!(totals.discount, Money::inr(1200));
    assert_eq!(totals.total, Money::inr(4999));
}

#[test]
fn rehydration_drops_coupon_removed_from_config() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (mut store, _) = open(Cache::open(dir.path()).unwrap());
        store.add_to_cart(&product("1", 3000, 10), 1, false).unwrap();
        store.apply_coupon("WELCOME10").unwrap();
    }

    let config = StoreConfig {
        coupons: vec![Coupon::fixed("FLAT500", 500, 2000)],
        ..StoreConfig::default()
    };
    let store = CartStore::open(
        Cache::open(dir.path()).unwrap(),
        config,
        Arc::new(RecordingNotifier::new()),
    )
    .unwrap();
    assert!(store.applied_coupon().is_none());
    assert_eq!(store.item_count(), 1);
}

#[test]
fn coupon_revalidated_after_removal() {
    let (mut store, notifier) = memory_store();
    store.add_to_cart(&product("1", 4000, 10), 1, false).unwrap();
    store.add_to_cart(&product("2", 1500, 10), 1, false).unwrap();
    store.apply_coupon("SUPER20").unwrap();

    store.remove_from_cart(&ProductId::new("2")).unwrap();
    assert!(store.applied_coupon().is_none());
    assert!(notifier
        .notifications()
        .iter()
        .any(|n| n.level == Level::Warning && n.message.contains("SUPER20")));
    assert_eq!(store.totals().unwrap().discount, Money::inr(0));
}

#[test]
fn buy_now_add_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    {
        let (mut store, _) = open(Cache::open(dir.path()).unwrap());
        store.add_to_cart(&product("1", 800, 5), 1, true).unwrap();
    }
    let (reloaded, _) = open(Cache::open(dir.path()).unwrap());
    assert_eq!(reloaded.item_count(), 1);
}

#[test]
fn re_adding_a_saved_product_keeps_lists_disjoint_across_reload() {
    let dir = tempfile::tempdir().unwrap();
    let headphones = product("1", 2000, 10);
    let id = ProductId::new("1");

    {
        let (mut store, _) = open(Cache::open(dir.path()).unwrap());
        store.add_to_cart(&headphones, 1, false).unwrap();
        store.move_to_saved_for_later(&id).unwrap();
        store.add_to_cart(&headphones, 2, false).unwrap();

        assert_eq!(store.get_item(&id).unwrap().quantity, 2);
        assert!(store.saved_for_later().is_empty());
    }

    let (reloaded, _) = open(Cache::open(dir.path()).unwrap());
    assert_eq!(reloaded.get_item(&id).unwrap().quantity, 2);
    assert!(reloaded.saved_for_later().is_empty());
}
