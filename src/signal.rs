// signal.rs
//
// Readable sources and structural wiring. `Connect` binds wires to sources
// shape by shape, so an input group can be wired to another module's output
// group without naming every leaf.

use crate::bits::Bits;
use crate::register::Register;
use crate::wire::Wire;

/// Anything that can be read as an `N`-bit value during evaluation.
pub trait Signal<const N: usize> {
    fn value(&self) -> Bits<N>;
}

impl<const N: usize> Signal<N> for Wire<N> {
    #[track_caller]
    fn value(&self) -> Bits<N> {
        self.read()
    }
}

impl<const N: usize> Signal<N> for Register<N> {
    fn value(&self) -> Bits<N> {
        self.read()
    }
}

/// A constant source.
impl<const N: usize> Signal<N> for Bits<N> {
    fn value(&self) -> Bits<N> {
        *self
    }
}

/// Bind the wires in `self` to the matching sources in `source`.
pub trait Connect<Source: ?Sized> {
    fn connect(&self, source: &Source);
}

impl<const N: usize, S> Connect<S> for Wire<N>
where
    S: Signal<N> + Clone + 'static,
{
    #[track_caller]
    fn connect(&self, source: &S) {
        let source = source.clone();
        self.bind(move || source.value());
    }
}

impl<T, S, const K: usize> Connect<[S; K]> for [T; K]
where
    T: Connect<S>,
{
    #[track_caller]
    fn connect(&self, source: &[S; K]) {
        for (wire, src) in self.iter().zip(source) {
            wire.connect(src);
        }
    }
}

macro_rules! tuple_connect {
    ($(($wire:ident, $src:ident, $idx:tt)),+) => {
        impl<$($wire, $src),+> Connect<($($src,)+)> for ($($wire,)+)
        where
            $($wire: Connect<$src>,)+
        {
            #[track_caller]
            fn connect(&self, source: &($($src,)+)) {
                $( self.$idx.connect(&source.$idx); )+
            }
        }
    };
}

tuple_connect!((W0, S0, 0));
tuple_connect!((W0, S0, 0), (W1, S1, 1));
tuple_connect!((W0, S0, 0), (W1, S1, 1), (W2, S2, 2));
tuple_connect!((W0, S0, 0), (W1, S1, 1), (W2, S2, 2), (W3, S3, 3));
