//! Boundary-exchange wiring: connectivity handle, buffer managers, and
//! per-functor exchange records.
//!
//! The distributed halo transport itself is an external collaborator;
//! these types carry the wiring state the orchestrator installs so each
//! functor knows which buffer pool services its exchanges.

use std::fmt;

use aeolus_core::InitError;

/// Identifies a class of boundary exchange sharing one buffer pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeKind {
    /// Standard halo accumulation exchange.
    Mpi,
    /// Min/max reduction exchange used by the tracer limiter.
    MpiMinMax,
}

impl fmt::Display for ExchangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mpi => write!(f, "mpi"),
            Self::MpiMinMax => write!(f, "mpi_min_max"),
        }
    }
}

/// Handle to the external element connectivity graph.
///
/// The transport layer owns the real neighbor tables; the orchestrator
/// only needs the element count to size exchange buffers.
#[derive(Clone, Copy, Debug)]
pub struct Connectivity {
    num_elems: usize,
}

impl Connectivity {
    /// Record the connectivity for `num_elems` elements.
    pub fn new(num_elems: usize) -> Self {
        Self { num_elems }
    }

    /// Number of elements in the local domain.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }
}

/// Buffer pool serving every exchange of one kind.
///
/// Capacity requests accumulate as high-water marks; the pool is sized
/// once all exchanges have registered.
#[derive(Debug)]
pub struct BuffersManager {
    kind: ExchangeKind,
    num_elems: usize,
    required_2d: usize,
    required_3d: usize,
}

impl BuffersManager {
    /// Create an empty pool for `kind` over the given connectivity.
    pub fn new(kind: ExchangeKind, connectivity: &Connectivity) -> Self {
        Self {
            kind,
            num_elems: connectivity.num_elems(),
            required_2d: 0,
            required_3d: 0,
        }
    }

    /// The exchange kind this pool serves.
    pub fn kind(&self) -> ExchangeKind {
        self.kind
    }

    /// Number of elements the pool is sized for.
    pub fn num_elems(&self) -> usize {
        self.num_elems
    }

    /// Raise the pool's capacity to cover an exchange needing this many
    /// fields.
    pub fn request_capacity(&mut self, num_2d_fields: usize, num_3d_fields: usize) {
        self.required_2d = self.required_2d.max(num_2d_fields);
        self.required_3d = self.required_3d.max(num_3d_fields);
    }

    /// The high-water field counts requested so far, `(2d, 3d)`.
    pub fn required_fields(&self) -> (usize, usize) {
        (self.required_2d, self.required_3d)
    }
}

/// One functor's attachment to a buffer pool.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryExchange {
    kind: ExchangeKind,
    num_2d_fields: usize,
    num_3d_fields: usize,
}

impl BoundaryExchange {
    /// Register an exchange of the given field counts with `bm`.
    pub fn new(
        bm: &mut BuffersManager,
        num_2d_fields: usize,
        num_3d_fields: usize,
    ) -> Result<Self, InitError> {
        bm.request_capacity(num_2d_fields, num_3d_fields);
        Ok(Self {
            kind: bm.kind(),
            num_2d_fields,
            num_3d_fields,
        })
    }

    /// The kind of pool servicing this exchange.
    pub fn kind(&self) -> ExchangeKind {
        self.kind
    }

    /// Registered field counts, `(2d, 3d)`.
    pub fn num_fields(&self) -> (usize, usize) {
        (self.num_2d_fields, self.num_3d_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_requests_accumulate_as_high_water_marks() {
        let conn = Connectivity::new(8);
        let mut bm = BuffersManager::new(ExchangeKind::Mpi, &conn);
        bm.request_capacity(1, 4);
        bm.request_capacity(0, 6);
        bm.request_capacity(2, 3);
        assert_eq!(bm.required_fields(), (2, 6));
        assert_eq!(bm.num_elems(), 8);
    }

    #[test]
    fn exchange_registration_raises_pool_capacity() {
        let conn = Connectivity::new(4);
        let mut bm = BuffersManager::new(ExchangeKind::Mpi, &conn);
        let be = BoundaryExchange::new(&mut bm, 0, 4).unwrap();
        assert_eq!(be.kind(), ExchangeKind::Mpi);
        assert_eq!(be.num_fields(), (0, 4));
        assert_eq!(bm.required_fields(), (0, 4));
    }
}
