//! Sale Archiving
//!
//! Moves every order line of a finished sale into an immutable
//! [`SaleArchive`] and clears the live orders. Archives form a hash chain:
//! each one stores the previous archive's hash and a SHA-256 over its own
//! content, so a tampered or dropped archive breaks [`verify_archive_chain`].

use serde::Serialize;
use sha2::{Digest, Sha256};
use shared::Timestamp;
use shared::models::{ArchivedBread, ArchivedOrderLine, Bread, SaleArchive};

use crate::money::to_f64;
use crate::pricing::{
    KibbutzLookup, PricedLine, PricingProfile, calculate_display_price, order_line_total,
};
use crate::utils::{PreorderError, PreorderResult};

/// Hashed view of an archive: everything except `hash` itself
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HashedContent<'a> {
    id: &'a str,
    archived_at: Timestamp,
    breads: &'a [ArchivedBread],
    previous_hash: Option<&'a str>,
}

/// SHA-256 over the archive's canonical JSON content, hex encoded
pub fn compute_archive_hash(archive: &SaleArchive) -> PreorderResult<String> {
    let content = HashedContent {
        id: &archive.id,
        archived_at: archive.archived_at,
        breads: &archive.breads,
        previous_hash: archive.previous_hash.as_deref(),
    };
    let bytes = serde_json::to_vec(&content)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

fn archive_bread<L>(bread: &Bread, lookup: &L) -> ArchivedBread
where
    L: KibbutzLookup + ?Sized,
{
    let orders = bread
        .orders
        .iter()
        .map(|line| {
            // Legacy lines are archived with the pricing they resolve to now
            let pricing = PricedLine::classify(line).snapshot(lookup);
            let profile = pricing.as_ref().map(PricingProfile::from);
            let unit_price = calculate_display_price(bread.base_price, profile.as_ref());

            ArchivedOrderLine {
                customer_id: line.customer_id.clone(),
                customer_name: line.customer_name.clone(),
                quantity: line.quantity,
                kibbutz_id: line.kibbutz_id.clone(),
                pricing,
                fulfilled: line.fulfilled,
                paid: line.paid,
                submitted_at: line.submitted_at,
                unit_price: to_f64(unit_price.display_price),
                line_total: to_f64(order_line_total(
                    bread.base_price,
                    profile.as_ref(),
                    line.quantity,
                )),
            }
        })
        .collect();

    ArchivedBread {
        bread_id: bread.id.clone(),
        name: bread.name.clone(),
        description: bread.description.clone(),
        base_price: bread.base_price,
        total_available: bread.total_available,
        orders,
    }
}

/// Archive the current sale and clear every bread's live orders
///
/// `previous` is the most recent archive, whose hash this one chains to.
/// Breads without orders are archived too, so the record shows the full
/// offer of the sale.
pub fn archive_sale<L>(
    breads: &mut [Bread],
    lookup: &L,
    archived_at: Timestamp,
    previous: Option<&SaleArchive>,
) -> PreorderResult<SaleArchive>
where
    L: KibbutzLookup + ?Sized,
{
    let mut archive = SaleArchive {
        id: uuid::Uuid::new_v4().to_string(),
        archived_at,
        breads: breads.iter().map(|b| archive_bread(b, lookup)).collect(),
        previous_hash: previous.map(|p| p.hash.clone()),
        hash: String::new(),
    };
    archive.hash = compute_archive_hash(&archive)?;

    for bread in breads.iter_mut() {
        bread.orders.clear();
    }

    tracing::info!(
        archive_id = %archive.id,
        breads = archive.breads.len(),
        orders = archive.order_count(),
        "Sale archived"
    );
    Ok(archive)
}

/// Verify hashes and links of archives ordered oldest first
pub fn verify_archive_chain(archives: &[SaleArchive]) -> PreorderResult<()> {
    let mut previous_hash: Option<&str> = None;

    for (index, archive) in archives.iter().enumerate() {
        if archive.previous_hash.as_deref() != previous_hash {
            return Err(PreorderError::ArchiveChainBroken {
                index,
                reason: format!(
                    "expected previous hash {:?}, found {:?}",
                    previous_hash, archive.previous_hash
                ),
            });
        }

        let expected = compute_archive_hash(archive)?;
        if expected != archive.hash {
            tracing::error!(archive_id = %archive.id, index, "Archive content does not match its hash");
            return Err(PreorderError::ArchiveChainBroken {
                index,
                reason: format!("content hash mismatch for archive {}", archive.id),
            });
        }

        previous_hash = Some(&archive.hash);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::KibbutzDirectory;
    use shared::Quantity;
    use shared::models::{Kibbutz, OrderLine, SurchargeKind};

    fn q(n: i64) -> Quantity {
        Quantity::whole(n)
    }

    fn sale() -> (Vec<Bread>, KibbutzDirectory) {
        let k = Kibbutz::new("k1", "Degania")
            .with_discount(10.0)
            .with_surcharge(SurchargeKind::PerOrder, 5.0);
        let dir = KibbutzDirectory::new(vec![k.clone()]);

        let mut rye = Bread::new("b1", "Rye", 10.0).with_total(q(10));
        rye.orders.push(OrderLine::for_kibbutz("c1", q(3), &k, 1));
        rye.orders.push(OrderLine::new("c2", q(2), 2));
        let spelt = Bread::new("b2", "Spelt", 20.0).with_total(q(4));

        (vec![rye, spelt], dir)
    }

    #[test]
    fn test_archive_moves_orders_and_prices_lines() {
        let (mut breads, dir) = sale();
        let archive = archive_sale(&mut breads, &dir, 1_000, None).unwrap();

        assert!(breads.iter().all(|b| b.orders.is_empty()));
        assert_eq!(archive.breads.len(), 2);
        assert_eq!(archive.order_count(), 2);
        assert!(archive.previous_hash.is_none());
        assert_eq!(archive.hash.len(), 64);

        let lines = &archive.breads[0].orders;
        // 10 - 10% = 9; 9 * 3 + 5
        assert_eq!(lines[0].unit_price, 9.0);
        assert_eq!(lines[0].line_total, 32.0);
        assert_eq!(lines[1].unit_price, 10.0);
        assert_eq!(lines[1].line_total, 20.0);
        assert!(archive.breads[1].orders.is_empty());
    }

    #[test]
    fn test_legacy_line_archived_with_resolved_pricing() {
        let (mut breads, dir) = sale();
        breads[0].orders[0].pricing = None;

        let archive = archive_sale(&mut breads, &dir, 1_000, None).unwrap();
        let pricing = archive.breads[0].orders[0].pricing.as_ref().unwrap();
        assert_eq!(pricing.discount_percentage, 10.0);
    }

    #[test]
    fn test_chain_links_and_verifies() {
        let (mut breads, dir) = sale();
        let first = archive_sale(&mut breads, &dir, 1_000, None).unwrap();

        breads[1].orders.push(OrderLine::new("c3", q(1), 3));
        let second = archive_sale(&mut breads, &dir, 2_000, Some(&first)).unwrap();

        assert_eq!(second.previous_hash.as_deref(), Some(first.hash.as_str()));
        verify_archive_chain(&[first.clone(), second.clone()]).unwrap();

        // Dropping the first archive breaks the link
        let err = verify_archive_chain(&[second.clone()]).unwrap_err();
        assert!(matches!(err, PreorderError::ArchiveChainBroken { index: 0, .. }));

        // Editing content breaks the hash
        let mut tampered = second;
        tampered.breads[1].orders[0].line_total = 0.0;
        let err = verify_archive_chain(&[first, tampered]).unwrap_err();
        assert!(matches!(err, PreorderError::ArchiveChainBroken { index: 1, .. }));
    }

    #[test]
    fn test_hash_survives_json_round_trip() {
        let (mut breads, dir) = sale();
        let archive = archive_sale(&mut breads, &dir, 1_000, None).unwrap();

        let json = serde_json::to_string(&archive).unwrap();
        let decoded: SaleArchive = serde_json::from_str(&json).unwrap();
        assert_eq!(compute_archive_hash(&decoded).unwrap(), archive.hash);
    }
}
