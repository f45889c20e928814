use crate::domain::sale::Sale;
use crate::domain::stage::BoardColumn;
use crate::repository::{SaleReader, SaleWriter};
use crate::services::ServiceResult;

/// One kanban column with the sales grouped into it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardColumnView {
    /// Column this view represents.
    pub column: BoardColumn,
    /// Sales placed in the column, keeping the input order.
    pub sales: Vec<Sale>,
}

/// Groups sales into the seven board columns, in display order. Placement
/// is recomputed from the canonical stage every time, so a card saved from
/// one of the collapsed columns reappears under `Negotiation`.
pub fn group_by_column(sales: &[Sale]) -> Vec<BoardColumnView> {
    BoardColumn::ALL
        .into_iter()
        .map(|column| BoardColumnView {
            column,
            sales: sales
                .iter()
                .filter(|sale| sale.stage.placement() == column)
                .cloned()
                .collect(),
        })
        .collect()
}

/// Transient drag state correlating a drag-start with the matching drop.
///
/// The only shared session state in the whole core: the id of the card
/// currently being dragged. Cleared unconditionally on every drop attempt
/// so a mismatched drop can never leave a stuck drag behind.
#[derive(Debug, Default)]
pub struct DragSession {
    dragging: Option<i64>,
}

impl DragSession {
    /// Start a new session with no drag in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the card picked up by the user.
    pub fn start_drag(&mut self, sale_id: i64) {
        self.dragging = Some(sale_id);
    }

    /// Id of the card currently in flight, if any.
    pub fn dragging(&self) -> Option<i64> {
        self.dragging
    }

    /// Abandon the in-flight drag without dropping.
    pub fn cancel(&mut self) {
        self.dragging = None;
    }

    /// Handle a drop of `dropped_id` onto `column`.
    ///
    /// The drop is honoured only when the in-flight token matches the
    /// dropped payload id; otherwise nothing changes. Either way the token
    /// is cleared. On a successful drop the sale's canonical stage becomes
    /// the column's reverse mapping; the status is never touched.
    pub fn drop_on<R>(
        &mut self,
        repo: &R,
        dropped_id: i64,
        column: BoardColumn,
    ) -> ServiceResult<Option<Sale>>
    where
        R: SaleReader + SaleWriter + ?Sized,
    {
        let token = self.dragging.take();
        if token != Some(dropped_id) {
            return Ok(None);
        }

        let Some(mut sale) = repo.get_sale_by_id(dropped_id)? else {
            return Ok(None);
        };
        sale.stage = column.funnel_stage();
        repo.update_sale(&sale).map_err(Into::into)
    }
}
