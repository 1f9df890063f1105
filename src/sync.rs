// sync.rs
//
// Structural traversal of module state. Every state shape knows how to reach
// its clocked leaves, so the per-cycle commit of a whole module is derived
// from the shape of its state instead of being registered field by field.

use std::marker::PhantomData;

use crate::bits::Bits;
use crate::register::Register;
use crate::wire::Wire;

/// Per-cycle boundary step for a piece of state.
///
/// Leaves: a [`Wire`] drops its memo, a [`Register`] commits. Composites
/// visit their members in a fixed order. Derive it for structs with
/// `#[derive(Synchronize)]`.
pub trait Synchronize {
    fn sync(&mut self);
}

impl<const N: usize> Synchronize for Wire<N> {
    fn sync(&mut self) {
        self.reset_cache();
    }
}

impl<const N: usize> Synchronize for Register<N> {
    fn sync(&mut self) {
        self.commit();
    }
}

impl<T: Synchronize, const K: usize> Synchronize for [T; K] {
    fn sync(&mut self) {
        for member in self.iter_mut() {
            member.sync();
        }
    }
}

impl<T: Synchronize> Synchronize for Option<T> {
    fn sync(&mut self) {
        if let Some(inner) = self {
            inner.sync();
        }
    }
}

impl<T: Synchronize + ?Sized> Synchronize for Box<T> {
    fn sync(&mut self) {
        (**self).sync();
    }
}

// Plain values hold no clocked state.

impl<const N: usize> Synchronize for Bits<N> {
    fn sync(&mut self) {}
}

impl Synchronize for () {
    fn sync(&mut self) {}
}

impl<T: ?Sized> Synchronize for PhantomData<T> {
    fn sync(&mut self) {}
}

macro_rules! tuple_sync {
    ($($part:ident $idx:tt),+) => {
        impl<$($part: Synchronize),+> Synchronize for ($($part,)+) {
            fn sync(&mut self) {
                $( self.$idx.sync(); )+
            }
        }
    };
}

tuple_sync!(A 0);
tuple_sync!(A 0, B 1);
tuple_sync!(A 0, B 1, C 2);
tuple_sync!(A 0, B 1, C 2, D 3);
tuple_sync!(A 0, B 1, C 2, D 3, E 4);
tuple_sync!(A 0, B 1, C 2, D 3, E 4, F 5);
tuple_sync!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
tuple_sync!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);
