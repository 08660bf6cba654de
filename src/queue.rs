use crate::error::{ElevatorError, Result};
use ahash::AHashMap;
use slab::Slab;

/// Device address unit a request targets.
pub type Sector = u64;
/// Host-assigned identifier, stable for as long as the request is queued.
pub type RequestId = u64;

/// The part of a host request the scheduler cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Request {
    pub id: RequestId,
    pub sector: Sector,
}

impl Request {
    pub fn new(id: RequestId, sector: Sector) -> Self {
        Self { id, sector }
    }

    #[inline]
    pub fn distance(&self, head: Sector) -> Sector {
        self.sector.abs_diff(head)
    }
}

/// Side of the head a request sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Strictly ahead of the head.
    Forward,
    /// At or behind the head.
    Backward,
}

impl Direction {
    #[inline]
    pub fn of(sector: Sector, head: Sector) -> Self {
        if sector > head {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

struct Node {
    request: Request,
    lane: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Clone, Copy, Default)]
struct Lane {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// `LANES` doubly linked request lists sharing one slab.
/// Links are slab keys, the id index maps host ids to keys, so removal
/// and neighbor lookup are O(1) and a request lives in at most one lane.
pub(crate) struct RequestArena<const LANES: usize> {
    nodes: Slab<Node>,
    index: AHashMap<RequestId, usize>,
    lanes: [Lane; LANES],
}

impl<const LANES: usize> RequestArena<LANES> {
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            index: AHashMap::new(),
            lanes: [Lane::default(); LANES],
        }
    }

    /// Reserve the id index for `capacity` queued requests up front.
    /// Node slots grow with the queue, so the only allocation made here is
    /// fallible and nothing is kept alive if it fails.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut index: AHashMap<RequestId, usize> = AHashMap::new();
        if index.try_reserve(capacity).is_err() {
            return Err(ElevatorError::ResourceExhausted {
                requested: capacity,
            });
        }
        Ok(Self {
            nodes: Slab::new(),
            index,
            lanes: [Lane::default(); LANES],
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn lane_len(&self, lane: usize) -> usize {
        self.lanes[lane].len
    }

    pub fn contains(&self, id: RequestId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn lane_of(&self, id: RequestId) -> Option<usize> {
        self.index.get(&id).map(|key| self.nodes[*key].lane)
    }

    pub fn front(&self, lane: usize) -> Option<&Request> {
        self.lanes[lane].head.map(|key| &self.nodes[key].request)
    }

    pub fn iter(&self, lane: usize) -> LaneIter<'_, LANES> {
        LaneIter {
            arena: self,
            cursor: self.lanes[lane].head,
        }
    }

    /// Key of the first entry in `lane` matching `pred`, scanning from the front.
    pub fn find<P>(&self, lane: usize, mut pred: P) -> Option<usize>
    where
        P: FnMut(&Request) -> bool,
    {
        let mut cursor = self.lanes[lane].head;
        while let Some(key) = cursor {
            let node = &self.nodes[key];
            if pred(&node.request) {
                return Some(key);
            }
            cursor = node.next;
        }
        None
    }

    /// Link `request` into `lane` right before `before`, or at the tail when
    /// `before` is `None`. `before` must be a key returned by `find` on the
    /// same lane with no mutation in between.
    pub fn insert_before(
        &mut self,
        lane: usize,
        before: Option<usize>,
        request: Request,
    ) -> Result<()> {
        if self.contains(request.id) {
            return Err(ElevatorError::AlreadyQueued(request.id));
        }
        let prev = match before {
            Some(next) => {
                debug_assert_eq!(self.nodes[next].lane, lane);
                self.nodes[next].prev
            }
            None => self.lanes[lane].tail,
        };
        let key = self.nodes.insert(Node {
            request,
            lane,
            prev,
            next: before,
        });
        match prev {
            Some(p) => self.nodes[p].next = Some(key),
            None => self.lanes[lane].head = Some(key),
        }
        match before {
            Some(n) => self.nodes[n].prev = Some(key),
            None => self.lanes[lane].tail = Some(key),
        }
        self.lanes[lane].len += 1;
        self.index.insert(request.id, key);
        Ok(())
    }

    pub fn push_back(&mut self, lane: usize, request: Request) -> Result<()> {
        self.insert_before(lane, None, request)
    }

    /// Unlink `id`, keeping the order of everything else.
    /// Returns the lane it was in.
    pub fn remove(&mut self, id: RequestId) -> Option<(usize, Request)> {
        let key = self.index.remove(&id)?;
        let node = self.nodes.remove(key);
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.lanes[node.lane].head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.lanes[node.lane].tail = node.prev,
        }
        self.lanes[node.lane].len -= 1;
        Some((node.lane, node.request))
    }

    pub fn pop_front(&mut self, lane: usize) -> Option<Request> {
        let id = self.front(lane)?.id;
        self.remove(id).map(|(_, request)| request)
    }

    pub fn prev(&self, id: RequestId) -> Option<Request> {
        let key = *self.index.get(&id)?;
        self.nodes[key].prev.map(|p| self.nodes[p].request)
    }

    pub fn next(&self, id: RequestId) -> Option<Request> {
        let key = *self.index.get(&id)?;
        self.nodes[key].next.map(|n| self.nodes[n].request)
    }
}

pub(crate) struct LaneIter<'a, const LANES: usize> {
    arena: &'a RequestArena<LANES>,
    cursor: Option<usize>,
}

impl<'a, const LANES: usize> Iterator for LaneIter<'a, LANES> {
    type Item = &'a Request;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.request)
    }
}
