use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical pipeline position stored on a sale.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelStage {
    /// Fresh opportunity that has not been worked yet.
    Lead,
    /// Seller is qualifying the opportunity.
    Prospecting,
    /// Terms are being negotiated with the customer.
    Negotiation,
    /// Deal is being closed.
    Closing,
    /// Deal was lost.
    Lost,
}

impl Default for FunnelStage {
    fn default() -> Self {
        Self::Lead
    }
}

impl FunnelStage {
    /// Forward stages shown in the funnel-health chart, in pipeline order.
    /// `Lost` is deliberately absent.
    pub const FORWARD: [FunnelStage; 4] = [
        FunnelStage::Lead,
        FunnelStage::Prospecting,
        FunnelStage::Negotiation,
        FunnelStage::Closing,
    ];

    /// Human-readable stage label.
    pub fn as_str(self) -> &'static str {
        match self {
            FunnelStage::Lead => "Lead",
            FunnelStage::Prospecting => "Prospecting",
            FunnelStage::Negotiation => "Negotiation",
            FunnelStage::Closing => "Closing",
            FunnelStage::Lost => "Lost",
        }
    }

    /// Board column a stage maps onto when grouped for the kanban view.
    pub fn board_column(self) -> BoardColumn {
        match self {
            FunnelStage::Lead => BoardColumn::Entry,
            FunnelStage::Prospecting => BoardColumn::Qualification,
            FunnelStage::Negotiation => BoardColumn::Negotiation,
            FunnelStage::Closing => BoardColumn::Won,
            FunnelStage::Lost => BoardColumn::Lost,
        }
    }

    /// Column a sale at this stage is placed into on the board.
    ///
    /// A stage whose label exactly matches a column name lands there
    /// directly; anything else goes through [`FunnelStage::board_column`].
    /// Today only `Negotiation` and `Lost` hit the direct path, and both
    /// agree with the forward mapping, but the rule keeps future stage
    /// values that name a column working without a code change.
    pub fn placement(self) -> BoardColumn {
        BoardColumn::from_label(self.as_str()).unwrap_or_else(|| self.board_column())
    }
}

impl fmt::Display for FunnelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual kanban column. A superset of [`FunnelStage`] used only for
/// grouping; nothing in the store ever records a column directly.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardColumn {
    Entry,
    Qualification,
    ProposalPresented,
    Negotiation,
    VerbalAgreement,
    Won,
    Lost,
}

impl BoardColumn {
    /// All columns in board display order.
    pub const ALL: [BoardColumn; 7] = [
        BoardColumn::Entry,
        BoardColumn::Qualification,
        BoardColumn::ProposalPresented,
        BoardColumn::Negotiation,
        BoardColumn::VerbalAgreement,
        BoardColumn::Won,
        BoardColumn::Lost,
    ];

    /// Human-readable column label.
    pub fn as_str(self) -> &'static str {
        match self {
            BoardColumn::Entry => "Entry",
            BoardColumn::Qualification => "Qualification",
            BoardColumn::ProposalPresented => "Proposal Presented",
            BoardColumn::Negotiation => "Negotiation",
            BoardColumn::VerbalAgreement => "Verbal Agreement",
            BoardColumn::Won => "Won",
            BoardColumn::Lost => "Lost",
        }
    }

    /// Resolve a column from its label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == label)
    }

    /// Canonical stage recorded when a card is dropped onto this column.
    ///
    /// Surjective by design: `ProposalPresented` and `VerbalAgreement`
    /// collapse onto `Negotiation`, so a card dropped there reappears under
    /// the `Negotiation` column after the board is regrouped from stages.
    pub fn funnel_stage(self) -> FunnelStage {
        match self {
            BoardColumn::Entry => FunnelStage::Lead,
            BoardColumn::Qualification => FunnelStage::Prospecting,
            BoardColumn::ProposalPresented => FunnelStage::Negotiation,
            BoardColumn::Negotiation => FunnelStage::Negotiation,
            BoardColumn::VerbalAgreement => FunnelStage::Negotiation,
            BoardColumn::Won => FunnelStage::Closing,
            BoardColumn::Lost => FunnelStage::Lost,
        }
    }
}

impl fmt::Display for BoardColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
