//! Cart ring: the wheel's slots and its top index.
//!
//! Carts are numbered clockwise from the cart that starts at the top. The
//! ring never moves animals between slots; rotating only moves the top
//! index. The bottom cart is always half a revolution from the top.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::animals::DeckAnimal;
use crate::core::config::valid_cart_count;

/// Rotation direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Top index moves by -1 per step.
    Clockwise,
    /// Top index moves by +1 per step. Player rotations go this way.
    CounterClockwise,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }

    /// Direction a SpinWheel value asks for: negative spins clockwise.
    #[must_use]
    pub fn from_spin(value: f32) -> Self {
        if value < 0.0 {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }
}

/// Fixed-size circular array of carts.
///
/// ## Example
///
/// ```
/// use ferris_wheel::wheel::{CartRing, Direction};
///
/// let mut ring = CartRing::new(8);
/// assert_eq!((ring.top(), ring.bottom()), (0, 4));
///
/// ring.advance(Direction::CounterClockwise, 3, |_| {});
/// assert_eq!((ring.top(), ring.bottom()), (3, 7));
/// assert_eq!(ring.opposite(ring.top()), ring.bottom());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartRing {
    carts: Vec<Option<DeckAnimal>>,
    top: usize,
}

impl CartRing {
    /// Create an empty ring. Invalid cart counts are clamped to the nearest
    /// even count of at least four.
    #[must_use]
    pub fn new(cart_count: usize) -> Self {
        let count = valid_cart_count(cart_count);
        if count != cart_count {
            warn!(requested = cart_count, using = count, "invalid cart count clamped");
        }
        Self {
            carts: vec![None; count],
            top: 0,
        }
    }

    /// Number of carts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    /// Always false; a ring has at least four carts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Cart at the top.
    #[must_use]
    pub fn top(&self) -> usize {
        self.top
    }

    /// Cart at the bottom, where loading and unloading happen.
    #[must_use]
    pub fn bottom(&self) -> usize {
        self.opposite(self.top)
    }

    /// Cart half a revolution away.
    #[must_use]
    pub fn opposite(&self, cart: usize) -> usize {
        (cart + self.len() / 2) % self.len()
    }

    /// Neighbouring cart in `direction`.
    #[must_use]
    pub fn adjacent(&self, cart: usize, direction: Direction) -> usize {
        let n = self.len();
        match direction {
            Direction::Clockwise => (cart + 1) % n,
            Direction::CounterClockwise => (cart + n - 1) % n,
        }
    }

    /// Move the top index one position.
    pub fn step(&mut self, direction: Direction) {
        let n = self.len();
        self.top = match direction {
            Direction::Clockwise => (self.top + n - 1) % n,
            Direction::CounterClockwise => (self.top + 1) % n,
        };
    }

    /// Move the top index `steps` positions, calling `on_step` after each
    /// single-position move.
    pub fn advance(&mut self, direction: Direction, steps: u32, mut on_step: impl FnMut(&mut Self)) {
        for _ in 0..steps {
            self.step(direction);
            on_step(self);
        }
    }

    /// Animal in a cart.
    #[must_use]
    pub fn get(&self, cart: usize) -> Option<&DeckAnimal> {
        self.carts.get(cart).and_then(Option::as_ref)
    }

    /// Mutable animal in a cart.
    pub fn get_mut(&mut self, cart: usize) -> Option<&mut DeckAnimal> {
        self.carts.get_mut(cart).and_then(Option::as_mut)
    }

    #[must_use]
    pub fn is_occupied(&self, cart: usize) -> bool {
        self.get(cart).is_some()
    }

    /// Occupied cart indices in ring order.
    pub fn occupied(&self) -> impl Iterator<Item = usize> + '_ {
        self.carts
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(i, _)| i)
    }

    /// Number of occupied carts.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.carts.iter().filter(|slot| slot.is_some()).count()
    }

    /// Load an animal into the bottom cart.
    ///
    /// Returns the cart index, or hands the animal back if the bottom cart is
    /// occupied.
    pub fn load(&mut self, animal: DeckAnimal) -> Result<usize, DeckAnimal> {
        let bottom = self.bottom();
        match &mut self.carts[bottom] {
            Some(_) => Err(animal),
            slot => {
                *slot = Some(animal);
                Ok(bottom)
            }
        }
    }

    /// Remove the animal from a cart.
    pub fn unload(&mut self, cart: usize) -> Option<DeckAnimal> {
        self.carts.get_mut(cart).and_then(Option::take)
    }

    /// Empty every cart and reset the top index. Returns the removed animals
    /// in ring order.
    pub fn clear(&mut self) -> Vec<DeckAnimal> {
        self.top = 0;
        self.carts.iter_mut().filter_map(Option::take).collect()
    }
}
