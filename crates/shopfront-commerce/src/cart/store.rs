//! The cart store: single owner of cart state and its persistence.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use shopfront_cache::Cache;
use tracing::{debug, info, warn};

use crate::cart::{pricing, Cart, CartTotals, Coupon, LineItem};
use crate::catalog::Product;
use crate::checkout::ShippingOption;
use crate::config::StoreConfig;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use crate::notify::{Notification, Notifier};

/// Cache key holding the cart line items.
pub const CART_KEY: &str = "cart";
/// Cache key holding the saved-for-later line items.
pub const SAVED_KEY: &str = "savedForLater";
/// Cache key holding the coupon code and shipping id.
pub const SELECTIONS_KEY: &str = "cartSelections";

#[derive(Debug, Default, Serialize, Deserialize)]
struct Selections {
    #[serde(default)]
    coupon_code: Option<String>,
    #[serde(default)]
    shipping_id: Option<String>,
}

/// Owns the cart, the saved-for-later list and the coupon and shipping
/// selections.
///
/// Every mutation is applied to a copy, written to the cache, and only then
/// becomes visible. A failed call leaves the in-memory state as it was.
pub struct CartStore {
    cart: Cart,
    cache: Cache,
    config: StoreConfig,
    notifier: Arc<dyn Notifier>,
}

impl CartStore {
    /// Rehydrate from `cache`, or start empty.
    ///
    /// Unreadable entries are discarded. A cached coupon or shipping id that
    /// is no longer configured is dropped or replaced with the default
    /// shipping option.
    pub fn open(
        cache: Cache,
        config: StoreConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CommerceError> {
        config.validate()?;
        let currency = config.currency;

        let mut items: Vec<LineItem> = load_or_default(&cache, CART_KEY);
        let mut saved: Vec<LineItem> = load_or_default(&cache, SAVED_KEY);
        let selections: Selections = load_or_default(&cache, SELECTIONS_KEY);

        let loaded = items.len() + saved.len();
        let mut seen = HashSet::new();
        items.retain(|i| is_restorable(i, currency) && seen.insert(i.product_id.clone()));
        saved.retain(|s| is_restorable(s, currency) && seen.insert(s.product_id.clone()));
        let mut dirty = items.len() + saved.len() != loaded;

        let shipping = match selections
            .shipping_id
            .as_deref()
            .and_then(|id| config.find_shipping(id))
        {
            Some(option) => option.clone(),
            None => {
                dirty |= selections.shipping_id.is_some();
                config.default_shipping()?.clone()
            }
        };

        let applied_coupon = match selections.coupon_code.as_deref() {
            Some(code) => {
                let coupon = config.find_coupon(code).cloned();
                if coupon.is_none() {
                    warn!(code, "dropping unknown cached coupon");
                    dirty = true;
                }
                coupon
            }
            None => None,
        };

        let mut cart = Cart::new(currency, shipping);
        cart.items = items;
        cart.saved_for_later = saved;
        cart.applied_coupon = applied_coupon;

        let mut store = Self {
            cart,
            cache,
            config,
            notifier,
        };

        let dropped = revalidate_coupon(&mut store.cart)?;
        if dirty || dropped.is_some() {
            store.persist(&store.cart)?;
        }
        if let Some(coupon) = dropped {
            store.announce_dropped(&coupon);
        }

        debug!(
            items = store.cart.items.len(),
            saved = store.cart.saved_for_later.len(),
            shipping = %store.cart.shipping.id,
            "cart rehydrated"
        );
        Ok(store)
    }

    /// Add `quantity` units of a product, merging with any quantity already
    /// in the cart.
    ///
    /// `is_buy_now` marks an add made on the way to a single-item checkout.
    /// It is persisted like any other add.
    pub fn add_to_cart(
        &mut self,
        product: &Product,
        quantity: i64,
        is_buy_now: bool,
    ) -> Result<(), CommerceError> {
        let result = self.update(|cart| cart.add_item(product, quantity));
        if let Err(e) = &result {
            self.reject(e);
            return result;
        }

        debug!(product_id = %product.id, quantity, is_buy_now, "added to cart");
        self.notify(Notification::success(format!("{} added to cart!", product.name)));
        result
    }

    /// Remove a product from the cart. Unknown ids are a no-op.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let removed = self.update(|cart| Ok(cart.remove_item(product_id)))?;
        if removed {
            debug!(%product_id, "removed from cart");
            self.notify(Notification::success("Item removed from cart"));
        }
        Ok(removed)
    }

    /// Set a line item's quantity. Below 1 removes the item.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return self.remove_from_cart(product_id);
        }

        match self.update(|cart| cart.update_quantity(product_id, quantity)) {
            Ok(changed) => {
                if changed {
                    debug!(%product_id, quantity, "quantity updated");
                }
                Ok(changed)
            }
            Err(e) => {
                self.reject(&e);
                Err(e)
            }
        }
    }

    /// Move a cart item to the saved-for-later list.
    pub fn move_to_saved_for_later(
        &mut self,
        product_id: &ProductId,
    ) -> Result<bool, CommerceError> {
        let moved = self.update(|cart| Ok(cart.save_for_later(product_id)))?;
        if moved {
            debug!(%product_id, "saved for later");
            self.notify(Notification::success("Item saved for later"));
        }
        Ok(moved)
    }

    /// Move a saved item back into the cart. Subject to the stock check of
    /// [`CartStore::add_to_cart`].
    pub fn move_to_cart(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let name = self.cart.get_saved(product_id).map(|i| i.name.clone());

        match self.update(|cart| cart.move_to_cart(product_id)) {
            Ok(true) => {
                debug!(%product_id, "moved to cart");
                if let Some(name) = name {
                    self.notify(Notification::success(format!("{name} added to cart!")));
                }
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                self.reject(&e);
                Err(e)
            }
        }
    }

    /// Drop an item from the saved-for-later list.
    pub fn remove_saved(&mut self, product_id: &ProductId) -> Result<bool, CommerceError> {
        let removed = self.update(|cart| Ok(cart.remove_saved(product_id)))?;
        if removed {
            debug!(%product_id, "removed from saved items");
            self.notify(Notification::success("Item removed from saved items"));
        }
        Ok(removed)
    }

    /// Empty the cart and drop the coupon. Saved items are kept.
    pub fn clear_cart(&mut self) -> Result<(), CommerceError> {
        self.update(|cart| {
            cart.clear();
            Ok(())
        })?;
        info!("cart cleared");
        self.notify(Notification::success("Cart cleared"));
        Ok(())
    }

    /// Select a configured shipping option.
    pub fn select_shipping(&mut self, id: &str) -> Result<&ShippingOption, CommerceError> {
        let Some(option) = self.config.find_shipping(id).cloned() else {
            let err = CommerceError::UnknownShippingOption(id.to_string());
            self.reject(&err);
            return Err(err);
        };

        self.update(|cart| {
            cart.shipping = option;
            Ok(())
        })?;
        debug!(shipping = id, "shipping selected");
        Ok(&self.cart.shipping)
    }

    /// Apply a coupon by code, replacing any coupon already applied.
    ///
    /// Rejections leave the current coupon in place.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Coupon, CommerceError> {
        let coupon = match self.check_coupon(code) {
            Ok(coupon) => coupon,
            Err(e) => {
                warn!(code, error = %e, "coupon rejected");
                self.reject(&e);
                return Err(e);
            }
        };

        let applied = coupon.clone();
        self.update(|cart| {
            cart.applied_coupon = Some(coupon);
            Ok(())
        })?;
        info!(code = %applied.code, "coupon applied");
        self.notify(Notification::success("Coupon applied successfully!"));
        Ok(applied)
    }

    /// Remove the applied coupon, if any.
    pub fn remove_coupon(&mut self) -> Result<(), CommerceError> {
        self.update(|cart| {
            cart.applied_coupon = None;
            Ok(())
        })?;
        debug!("coupon removed");
        self.notify(Notification::success("Coupon removed"));
        Ok(())
    }

    /// Price the cart.
    ///
    /// If the applied coupon no longer meets its minimum it is removed (and
    /// the removal persisted) before pricing.
    pub fn totals(&mut self) -> Result<CartTotals, CommerceError> {
        if self.coupon_is_stale()? {
            self.update(|_| Ok(()))?;
        }
        pricing::quote(
            &self.cart.items,
            self.cart.applied_coupon.as_ref(),
            &self.cart.shipping,
            self.cart.currency,
        )
    }

    /// Price arbitrary items with the current shipping option and coupon.
    /// The coupon only counts if those items alone reach its minimum.
    pub fn quote_items(&self, items: &[LineItem]) -> Result<CartTotals, CommerceError> {
        pricing::quote(
            items,
            self.cart.applied_coupon.as_ref(),
            &self.cart.shipping,
            self.cart.currency,
        )
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        &self.cart.items
    }

    pub fn saved_for_later(&self) -> &[LineItem] {
        &self.cart.saved_for_later
    }

    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.cart.applied_coupon.as_ref()
    }

    pub fn shipping(&self) -> &ShippingOption {
        &self.cart.shipping
    }

    /// Configured shipping options, in display order.
    pub fn shipping_options(&self) -> &[ShippingOption] {
        &self.config.shipping_options
    }

    /// Configured coupons.
    pub fn coupons(&self) -> &[Coupon] {
        &self.config.coupons
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn currency(&self) -> Currency {
        self.cart.currency
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn get_item(&self, product_id: &ProductId) -> Option<&LineItem> {
        self.cart.get_item(product_id)
    }

    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        self.cart.subtotal()
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub(crate) fn notify(&self, notification: Notification) {
        self.notifier.notify(notification);
    }

    /// Apply `f` to a copy of the cart, re-check the coupon, persist, then
    /// commit.
    fn update<R>(
        &mut self,
        f: impl FnOnce(&mut Cart) -> Result<R, CommerceError>,
    ) -> Result<R, CommerceError> {
        let mut next = self.cart.clone();
        let result = f(&mut next)?;
        let dropped = revalidate_coupon(&mut next)?;

        self.persist(&next)?;
        self.cart = next;

        if let Some(coupon) = dropped {
            self.announce_dropped(&coupon);
        }
        Ok(result)
    }

    fn persist(&self, cart: &Cart) -> Result<(), CommerceError> {
        let selections = Selections {
            coupon_code: cart.applied_coupon.as_ref().map(|c| c.code.clone()),
            shipping_id: Some(cart.shipping.id.clone()),
        };
        self.cache.set(CART_KEY, &cart.items)?;
        self.cache.set(SAVED_KEY, &cart.saved_for_later)?;
        self.cache.set(SELECTIONS_KEY, &selections)?;
        Ok(())
    }

    fn check_coupon(&self, code: &str) -> Result<Coupon, CommerceError> {
        let coupon = self
            .config
            .find_coupon(code)
            .cloned()
            .ok_or_else(|| CommerceError::CouponNotFound(code.trim().to_string()))?;

        let subtotal = self.cart.subtotal()?;
        if !coupon.is_eligible(&subtotal) {
            return Err(CommerceError::CouponMinimumNotMet {
                code: coupon.code.clone(),
                minimum: coupon.minimum(&subtotal),
                subtotal,
            });
        }
        Ok(coupon)
    }

    fn coupon_is_stale(&self) -> Result<bool, CommerceError> {
        match &self.cart.applied_coupon {
            Some(coupon) => Ok(!coupon.is_eligible(&self.cart.subtotal()?)),
            None => Ok(false),
        }
    }

    fn announce_dropped(&self, coupon: &Coupon) {
        let minimum = Money::new(coupon.minimum_order_amount, self.cart.currency);
        warn!(code = %coupon.code, %minimum, "coupon no longer eligible");
        self.notify(Notification::warning(format!(
            "Coupon {} removed: minimum order amount is {}",
            coupon.code, minimum
        )));
    }

    fn reject(&self, error: &CommerceError) {
        let message = match error {
            CommerceError::StockExceeded { available, .. } => {
                format!("Only {available} units available")
            }
            CommerceError::CouponNotFound(_) => "Invalid coupon code".to_string(),
            CommerceError::CouponMinimumNotMet { minimum, .. } => {
                format!("Minimum order amount for this coupon is {minimum}")
            }
            other => other.to_string(),
        };
        debug!(error = %error, "cart operation rejected");
        self.notify(Notification::error(message));
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

/// Drop the coupon if the cart no longer reaches its minimum.
fn revalidate_coupon(cart: &mut Cart) -> Result<Option<Coupon>, CommerceError> {
    let Some(coupon) = &cart.applied_coupon else {
        return Ok(None);
    };
    if coupon.is_eligible(&cart.subtotal()?) {
        Ok(None)
    } else {
        Ok(cart.applied_coupon.take())
    }
}

/// Quantity within `1..=stock` and priced in the store currency.
fn is_restorable(item: &LineItem, currency: Currency) -> bool {
    item.quantity >= 1 && item.quantity <= item.stock && item.unit_price.currency == currency
}

fn load_or_default<T: DeserializeOwned + Default>(cache: &Cache, key: &str) -> T {
    match cache.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "discarding unreadable cached value");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Level, RecordingNotifier};

    fn store() -> (CartStore, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let store =
            CartStore::open(Cache::in_memory(), StoreConfig::default(), notifier.clone()).unwrap();
        (store, notifier)
    }

    fn product(id: &str, price: i64, stock: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::inr(price), stock)
    }

    #[test]
    fn test_starts_empty_with_cheapest_shipping() {
        let (store, _) = store();
        assert!(store.is_empty());
        assert!(store.saved_for_later().is_empty());
        assert!(store.applied_coupon().is_none());
        assert_eq!(store.shipping().id, "free");
    }

    #[test]
    fn test_add_notifies() {
        let (mut store, notifier) = store();
        store.add_to_cart(&product("1", 1000, 5), 2, false).unwrap();

        assert_eq!(store.item_count(), 2);
        assert!(notifier.contains("Product 1 added to cart!"));
    }

    #[test]
    fn test_stock_rejection_notifies_and_keeps_state() {
        let (mut store, notifier) = store();
        let result = store.add_to_cart(&product("1", 1000, 3), 5, false);

        assert!(matches!(result, Err(CommerceError::StockExceeded { available: 3, .. })));
        assert!(store.is_empty());
        let last = notifier.last().unwrap();
        assert_eq!(last.level, Level::Error);
        assert_eq!(last.message, "Only 3 units available");
    }

    #[test]
    fn test_coupon_rejections() {
        let (mut store, notifier) = store();
        store.add_to_cart(&product("1", 500, 5), 1, false).unwrap();

        assert!(matches!(
            store.apply_coupon("BOGUS"),
            Err(CommerceError::CouponNotFound(_))
        ));
        assert!(notifier.contains("Invalid coupon code"));

        assert!(matches!(
            store.apply_coupon("FLAT500"),
            Err(CommerceError::CouponMinimumNotMet { .. })
        ));
        assert!(notifier.contains("Minimum order amount for this coupon is \u{20b9}2,000"));
        assert!(store.applied_coupon().is_none());
    }

    #[test]
    fn test_coupon_replaces_previous() {
        let (mut store, _) = store();
        store.add_to_cart(&product("1", 3000, 5), 2, false).unwrap();

        store.apply_coupon("welcome10").unwrap();
        store.apply_coupon("FLAT500").unwrap();
        assert_eq!(store.applied_coupon().unwrap().code, "FLAT500");
        assert_eq!(store.totals().unwrap().discount.amount, 500);
    }

    #[test]
    fn test_coupon_dropped_when_cart_shrinks() {
        let (mut store, notifier) = store();
        store.add_to_cart(&product("1", 1000, 5), 2, false).unwrap();
        store.apply_coupon("FLAT500").unwrap();

        store.update_quantity(&ProductId::new("1"), 1).unwrap();
        assert!(store.applied_coupon().is_none());
        let last = notifier.last().unwrap();
        assert_eq!(last.level, Level::Warning);
        assert!(last.message.starts_with("Coupon FLAT500 removed"));
    }

    #[test]
    fn test_select_unknown_shipping() {
        let (mut store, _) = store();
        assert!(matches!(
            store.select_shipping("teleport"),
            Err(CommerceError::UnknownShippingOption(_))
        ));
        assert_eq!(store.shipping().id, "free");

        assert_eq!(store.select_shipping("express").unwrap().price, 199);
    }

    #[test]
    fn test_clear_keeps_saved_and_drops_coupon() {
        let (mut store, _) = store();
        store.add_to_cart(&product("1", 3000, 5), 1, false).unwrap();
        store.add_to_cart(&product("2", 100, 5), 1, false).unwrap();
        store.move_to_saved_for_later(&ProductId::new("2")).unwrap();
        store.apply_coupon("WELCOME10").unwrap();

        store.clear_cart().unwrap();
        assert!(store.is_empty());
        assert!(store.applied_coupon().is_none());
        assert_eq!(store.saved_for_later().len(), 1);
    }

    #[test]
    fn test_persists_every_key() {
        let (mut store, _) = store();
        store.add_to_cart(&product("1", 1000, 5), 2, false).unwrap();
        store.select_shipping("standard").unwrap();

        let items: Vec<LineItem> = store.cache.get(CART_KEY).unwrap().unwrap();
        assert_eq!(items.len(), 1);
        let saved: Vec<LineItem> = store.cache.get(SAVED_KEY).unwrap().unwrap();
        assert!(saved.is_empty());
        let selections: Selections = store.cache.get(SELECTIONS_KEY).unwrap().unwrap();
        assert_eq!(selections.shipping_id.as_deref(), Some("standard"));
        assert!(selections.coupon_code.is_none());
    }

    #[test]
    fn test_rehydration_drops_unknown_selections() {
        let cache = Cache::in_memory();
        cache
            .set(
                SELECTIONS_KEY,
                &Selections {
                    coupon_code: Some("RETIRED".to_string()),
                    shipping_id: Some("drone".to_string()),
                },
            )
            .unwrap();
        cache.set(CART_KEY, &"garbage").unwrap();

        let store =
            CartStore::open(cache, StoreConfig::default(), Arc::new(RecordingNotifier::new()))
                .unwrap();
        assert!(store.applied_coupon().is_none());
        assert_eq!(store.shipping().id, "free");
        assert!(store.is_empty());
    }

    #[test]
    fn test_rehydration_drops_duplicates_and_overstock() {
        let cache = Cache::in_memory();
        let headphones = LineItem::from_product(&product("1", 1000, 10), 2);
        let watch = LineItem::from_product(&product("2", 500, 3), 3);
        let overstocked = LineItem {
            quantity: 9,
            ..LineItem::from_product(&product("3", 700, 4), 1)
        };
        cache
            .set(
                CART_KEY,
                &vec![
                    headphones.clone(),
                    LineItem { quantity: 5, ..headphones.clone() },
                    overstocked,
                ],
            )
            .unwrap();
        cache
            .set(SAVED_KEY, &vec![watch.clone(), headphones.clone(), watch.clone()])
            .unwrap();

        let store =
            CartStore::open(cache, StoreConfig::default(), Arc::new(RecordingNotifier::new()))
                .unwrap();
        assert_eq!(store.items(), &[headphones.clone()]);
        assert_eq!(store.saved_for_later(), &[watch]);

        let persisted: Vec<LineItem> = store.cache.get(CART_KEY).unwrap().unwrap();
        assert_eq!(persisted, vec![headphones]);
    }

    #[test]
    fn test_quote_items_uses_coupon_only_when_eligible() {
        let (mut store, _) = store();
        store.add_to_cart(&product("1", 3000, 5), 1, false).unwrap();
        store.apply_coupon("FLAT500").unwrap();
        store.select_shipping("express").unwrap();

        let small = LineItem::from_product(&product("9", 400, 5), 1);
        let totals = store.quote_items(&[small]).unwrap();
        assert_eq!(totals.discount.amount, 0);
        assert_eq!(totals.total.amount, 599);

        let big = LineItem::from_product(&product("9", 2500, 5), 1);
        let totals = store.quote_items(&[big]).unwrap();
        assert_eq!(totals.discount.amount, 500);
        assert_eq!(totals.total.amount, 2199);
    }
}
