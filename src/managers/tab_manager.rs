//! Tab set controller for tabshell.
//!
//! Sole owner of the open tabs and the active-tab pointer. Every operation is
//! total: unknown tab ids and history boundaries are silent no-ops, never
//! errors, because ids are generated here and never typed by the user.

use uuid::Uuid;

use crate::types::tab::{LoadTicket, TabRecord};

/// Source of tab identifiers.
pub trait IdProvider: Send {
    fn next_id(&mut self) -> String;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Default)]
pub struct UuidIdProvider;

impl IdProvider for UuidIdProvider {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `tab-1`, `tab-2`, ... identifiers.
#[derive(Debug, Default)]
pub struct SequentialIdProvider {
    issued: u64,
}

impl SequentialIdProvider {
    pub fn new() -> Self {
        Self { issued: 0 }
    }
}

impl IdProvider for SequentialIdProvider {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("tab-{}", self.issued)
    }
}

/// Trait defining the tab set interface.
pub trait TabSetTrait {
    fn open_tab(&mut self) -> String;
    fn close_tab(&mut self, tab_id: &str);
    fn activate_tab(&mut self, tab_id: &str);
    fn navigate(&mut self, tab_id: &str, location: &str) -> Option<LoadTicket>;
    fn reload(&mut self, tab_id: &str) -> Option<LoadTicket>;
    fn go_back(&mut self, tab_id: &str) -> Option<LoadTicket>;
    fn go_forward(&mut self, tab_id: &str) -> Option<LoadTicket>;
    fn mark_loaded(&mut self, ticket: &LoadTicket) -> bool;
    fn tab(&self, tab_id: &str) -> Option<&TabRecord>;
    fn tabs(&self) -> &[TabRecord];
    fn active_tab(&self) -> &TabRecord;
    fn active_tab_id(&self) -> &str;
    fn tab_count(&self) -> usize;
    fn pending_ticket(&self, tab_id: &str) -> Option<LoadTicket>;
}

/// In-memory tab set. Always holds at least one tab, exactly one of which
/// is active.
pub struct TabSetController {
    tabs: Vec<TabRecord>,
    active_tab_id: String,
    ids: Box<dyn IdProvider>,
}

impl TabSetController {
    /// Creates a controller holding a single fresh, active tab.
    pub fn new(mut ids: Box<dyn IdProvider>) -> Self {
        let first = TabRecord::fresh(ids.next_id());
        let active_tab_id = first.id.clone();
        Self {
            tabs: vec![first],
            active_tab_id,
            ids,
        }
    }

    fn find_tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn tab_mut(&mut self, tab_id: &str) -> Option<&mut TabRecord> {
        let tab = self.tabs.iter_mut().find(|t| t.id == tab_id);
        if tab.is_none() {
            tracing::debug!(tab_id, "ignoring operation on unknown tab");
        }
        tab
    }

    /// Marks a navigation intent: loading on, new sequence number.
    fn begin_load(tab: &mut TabRecord) -> LoadTicket {
        tab.is_loading = true;
        tab.load_seq += 1;
        LoadTicket {
            tab_id: tab.id.clone(),
            seq: tab.load_seq,
        }
    }
}

impl Default for TabSetController {
    fn default() -> Self {
        Self::new(Box::new(UuidIdProvider))
    }
}

impl TabSetTrait for TabSetController {
    /// Appends a fresh tab and makes it active. Returns its id.
    fn open_tab(&mut self) -> String {
        let tab = TabRecord::fresh(self.ids.next_id());
        let id = tab.id.clone();
        self.tabs.push(tab);
        self.active_tab_id = id.clone();
        id
    }

    /// Closes a tab. The active tab moves to the closed tab's predecessor.
    /// Closing the only tab resets it in place under a new id.
    fn close_tab(&mut self, tab_id: &str) {
        let Some(index) = self.find_tab_index(tab_id) else {
            tracing::debug!(tab_id, "ignoring close of unknown tab");
            return;
        };

        if self.tabs.len() == 1 {
            let fresh = TabRecord::fresh(self.ids.next_id());
            self.active_tab_id = fresh.id.clone();
            self.tabs[0] = fresh;
            return;
        }

        let removed = self.tabs.remove(index);
        if removed.id == self.active_tab_id {
            let next = index.saturating_sub(1);
            self.active_tab_id = self.tabs[next].id.clone();
        }
    }

    fn activate_tab(&mut self, tab_id: &str) {
        if self.find_tab_index(tab_id).is_some() {
            self.active_tab_id = tab_id.to_string();
        } else {
            tracing::debug!(tab_id, "ignoring activation of unknown tab");
        }
    }

    /// Commits a new location to the tab: history push, title mirrors the
    /// raw location, loading starts.
    fn navigate(&mut self, tab_id: &str, location: &str) -> Option<LoadTicket> {
        let tab = self.tab_mut(tab_id)?;
        tab.location = location.to_string();
        tab.title = location.to_string();
        tab.history.push(location);
        let ticket = Self::begin_load(tab);
        tracing::debug!(tab_id, location, seq = ticket.seq, "navigate");
        Some(ticket)
    }

    /// Navigates again to the tab's current location.
    fn reload(&mut self, tab_id: &str) -> Option<LoadTicket> {
        let location = self.tab(tab_id)?.location.clone();
        self.navigate(tab_id, &location)
    }

    fn go_back(&mut self, tab_id: &str) -> Option<LoadTicket> {
        let tab = self.tab_mut(tab_id)?;
        let location = tab.history.back()?.to_string();
        tab.location = location;
        Some(Self::begin_load(tab))
    }

    fn go_forward(&mut self, tab_id: &str) -> Option<LoadTicket> {
        let tab = self.tab_mut(tab_id)?;
        let location = tab.history.forward()?.to_string();
        tab.location = location;
        Some(Self::begin_load(tab))
    }

    /// Clears the loading flag if `ticket` is the tab's latest navigation.
    /// Returns whether the flag was cleared.
    fn mark_loaded(&mut self, ticket: &LoadTicket) -> bool {
        let Some(tab) = self.tabs.iter_mut().find(|t| t.id == ticket.tab_id) else {
            tracing::debug!(tab_id = %ticket.tab_id, "load completed for a tab that no longer exists");
            return false;
        };
        if tab.load_seq != ticket.seq {
            tracing::debug!(
                tab_id = %ticket.tab_id,
                stale = ticket.seq,
                current = tab.load_seq,
                "ignoring stale load completion"
            );
            return false;
        }
        let was_loading = tab.is_loading;
        tab.is_loading = false;
        was_loading
    }

    fn tab(&self, tab_id: &str) -> Option<&TabRecord> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn tabs(&self) -> &[TabRecord] {
        &self.tabs
    }

    /// Derived on every call from the active id; never cached.
    fn active_tab(&self) -> &TabRecord {
        self.tab(&self.active_tab_id).unwrap_or(&self.tabs[0])
    }

    fn active_tab_id(&self) -> &str {
        &self.active_tab_id
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// The ticket of the tab's outstanding load, if one is in flight.
    fn pending_ticket(&self, tab_id: &str) -> Option<LoadTicket> {
        self.tab(tab_id)
            .filter(|t| t.is_loading)
            .map(|t| LoadTicket {
                tab_id: t.id.clone(),
                seq: t.load_seq,
            })
    }
}
