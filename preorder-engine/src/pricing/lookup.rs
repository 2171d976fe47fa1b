//! Kibbutz lookup and pricing resolution for stored order lines
//!
//! An order line is priced either from its own snapshot or, for legacy
//! lines written before snapshots existed, from the live kibbutz record.
//! [`PricedLine`] makes that choice explicit instead of probing for missing
//! fields at every call site.

use std::collections::HashMap;

use shared::models::{Kibbutz, OrderLine, PricingSnapshot};

use super::calculator::PricingProfile;

/// Read access to kibbutz records by ID
pub trait KibbutzLookup {
    fn get_kibbutz(&self, id: &str) -> Option<&Kibbutz>;
}

impl KibbutzLookup for [Kibbutz] {
    fn get_kibbutz(&self, id: &str) -> Option<&Kibbutz> {
        self.iter().find(|k| k.id == id)
    }
}

impl KibbutzLookup for Vec<Kibbutz> {
    fn get_kibbutz(&self, id: &str) -> Option<&Kibbutz> {
        self.as_slice().get_kibbutz(id)
    }
}

impl KibbutzLookup for HashMap<String, Kibbutz> {
    fn get_kibbutz(&self, id: &str) -> Option<&Kibbutz> {
        self.get(id)
    }
}

/// Kibbutz records indexed by ID
///
/// Built once by the caller from whatever it loaded and passed to every
/// engine function that needs group information.
#[derive(Debug, Clone, Default)]
pub struct KibbutzDirectory {
    by_id: HashMap<String, Kibbutz>,
}

impl KibbutzDirectory {
    pub fn new(kibbutzim: impl IntoIterator<Item = Kibbutz>) -> Self {
        Self {
            by_id: kibbutzim.into_iter().map(|k| (k.id.clone(), k)).collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Kibbutz> {
        self.by_id.get(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Kibbutz> {
        self.by_id.values()
    }
}

impl KibbutzLookup for KibbutzDirectory {
    fn get_kibbutz(&self, id: &str) -> Option<&Kibbutz> {
        self.get(id)
    }
}

/// An order line together with where its pricing comes from
#[derive(Debug, Clone, Copy)]
pub enum PricedLine<'a> {
    /// Line carries its own pricing snapshot
    Priced {
        line: &'a OrderLine,
        snapshot: &'a PricingSnapshot,
    },
    /// Legacy line: pricing must be resolved through a kibbutz lookup
    Unpriced { line: &'a OrderLine },
}

impl<'a> PricedLine<'a> {
    pub fn classify(line: &'a OrderLine) -> Self {
        match &line.pricing {
            Some(snapshot) => PricedLine::Priced { line, snapshot },
            None => PricedLine::Unpriced { line },
        }
    }

    pub fn line(&self) -> &'a OrderLine {
        match self {
            PricedLine::Priced { line, .. } | PricedLine::Unpriced { line } => *line,
        }
    }

    /// Pricing terms the line is charged under
    ///
    /// `None` means the base price applies: a general line, or a legacy line
    /// whose kibbutz no longer exists.
    pub fn snapshot<L>(&self, lookup: &L) -> Option<PricingSnapshot>
    where
        L: KibbutzLookup + ?Sized,
    {
        match self {
            PricedLine::Priced { snapshot, .. } => Some((*snapshot).clone()),
            PricedLine::Unpriced { line } => {
                let kibbutz_id = line.kibbutz_id.as_deref()?;
                match lookup.get_kibbutz(kibbutz_id) {
                    Some(kibbutz) => Some(PricingSnapshot::from(kibbutz)),
                    None => {
                        tracing::debug!(
                            customer_id = %line.customer_id,
                            kibbutz_id = %kibbutz_id,
                            "Legacy order line references unknown kibbutz, using base price"
                        );
                        None
                    }
                }
            }
        }
    }

    /// Resolved pricing profile, see [`PricedLine::snapshot`]
    pub fn profile<L>(&self, lookup: &L) -> Option<PricingProfile>
    where
        L: KibbutzLookup + ?Sized,
    {
        self.snapshot(lookup).as_ref().map(PricingProfile::from)
    }
}
