//! Property-based tests for the simulation core.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use crate::circuits::Opcode;
use crate::error::ErrorKind;
use crate::scheduler::SchedulerConfig;
use crate::test_utils::test_helpers::*;
use crate::{Bits, Register, Scheduler, Wire};

proptest! {
    /// Construction keeps exactly the low N bits.
    #[test]
    fn prop_new_is_modulo_width(v in any::<u32>()) {
        prop_assert_eq!(Bits::<1>::new(v).value(), v % 2);
        prop_assert_eq!(Bits::<5>::new(v).value(), v % 32);
        prop_assert_eq!(Bits::<13>::new(v).value(), v % (1 << 13));
        prop_assert_eq!(Bits::<31>::new(v).value(), v % (1 << 31));
        prop_assert_eq!(Bits::<32>::new(v).value(), v);
    }

    /// Slicing a value into pieces and concatenating them rebuilds it.
    #[test]
    fn prop_slice_concat_identity(v in any::<u32>()) {
        let word = Bits::<32>::new(v);
        let bytes = (
            word.range::<31, 24, 8>(),
            word.range::<23, 16, 8>(),
            word.range::<15, 8, 8>(),
            word.range::<7, 0, 8>(),
        );
        prop_assert_eq!(Bits::<32>::concat(bytes), word);

        let narrow = Bits::<11>::new(v);
        let parts = (narrow.range::<10, 10, 1>(), narrow.range::<9, 3, 7>(), narrow.range::<2, 0, 3>());
        prop_assert_eq!(Bits::<11>::concat(parts), narrow);
        prop_assert_eq!(Bits::<11>::concat(narrow.range::<10, 0, 11>()), narrow);
    }

    /// Sign extension preserves the signed value; zero extension the unsigned one.
    #[test]
    fn prop_extension_preserves_value(v in any::<u32>()) {
        let byte = Bits::<8>::new(v);
        prop_assert_eq!(byte.sign_extend::<32>().to_signed(), byte.to_signed());
        prop_assert_eq!(byte.sign_extend::<12>().to_signed(), byte.to_signed());
        prop_assert_eq!(byte.zero_extend::<20>().value(), byte.value());
    }

    /// Operators agree with wrapping machine arithmetic reduced to the width.
    #[test]
    fn prop_operators_wrap(a in any::<u32>(), b in any::<u32>()) {
        let (x, y) = (Bits::<12>::new(a), Bits::<12>::new(b));
        let mask = (1u32 << 12) - 1;
        prop_assert_eq!((x + y).value(), x.value().wrapping_add(y.value()) & mask);
        prop_assert_eq!((x - y).value(), x.value().wrapping_sub(y.value()) & mask);
        prop_assert_eq!((x * y).value(), x.value().wrapping_mul(y.value()) & mask);
        prop_assert_eq!((x ^ y).value(), x.value() ^ y.value());
        prop_assert_eq!((!x).value(), !x.value() & mask);
        prop_assert_eq!(x + b, x + y);
    }

    /// A committed write is read back truncated; reads before commit see
    /// the old value.
    #[test]
    fn prop_register_write_commit(old in any::<u32>(), new in any::<u32>()) {
        let reg: Register<20> = Register::new();
        reg.write(old);
        reg.commit();
        reg.write(new);
        prop_assert_eq!(reg.read().value(), old & 0xf_ffff);
        reg.commit();
        prop_assert_eq!(reg.read().value(), new & 0xf_ffff);
        reg.commit();
        prop_assert_eq!(reg.read().value(), new & 0xf_ffff);
    }

    /// A second write in one cycle is rejected and the first write stands.
    #[test]
    fn prop_register_double_write(first in any::<u32>(), second in any::<u32>()) {
        let reg: Register<32> = Register::new();
        prop_assert!(reg.try_write(first).is_ok());
        let err = reg.try_write(second).unwrap_err();
        let is_double_write = matches!(err.kind, ErrorKind::DoubleWriteViolation { width: 32, .. });
        prop_assert!(is_double_write);
        reg.commit();
        prop_assert_eq!(reg.read().value(), first);
    }

    /// Reads in one cycle run the evaluator once; each reset forces one more run.
    #[test]
    fn prop_wire_memoizes(value in any::<u32>(), reads in 1usize..10, cycles in 1usize..5) {
        let calls = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&calls);
        let wire: Wire<16> = Wire::from_fn(move || {
            counter.set(counter.get() + 1);
            value
        });
        for _ in 0..cycles {
            for _ in 0..reads {
                prop_assert_eq!(wire.read().value(), value & 0xffff);
            }
            wire.reset_cache();
        }
        prop_assert_eq!(calls.get(), cycles);
    }

    /// A circuit that stages no writes never changes its outputs.
    #[test]
    fn prop_quiescent_is_stable(start in any::<u8>(), steps in 1u64..50) {
        let counter = create_counter(false);
        counter.output.count.write(start as u32);
        counter.output.count.commit();
        let count = counter.output.count.clone();
        let mut scheduler = Scheduler::new();
        scheduler.add(counter);
        scheduler.run(steps, false);
        prop_assert_eq!(count.read().value(), start as u32);
    }

    /// Natural and shuffled evaluation orders produce the same register
    /// history.
    #[test]
    fn prop_order_independence(depth in 1usize..8, cycles in 1u64..40, seed in any::<u64>()) {
        let config = SchedulerConfig { seed, record_trace: true };
        let (mut natural, _) = create_ring(depth, config);
        let (mut shuffled, _) = create_ring(depth, config);
        natural.run(cycles, false);
        shuffled.run(cycles, true);
        prop_assert_eq!(natural.trace(), shuffled.trace());
    }

    /// ALU arithmetic agrees with machine arithmetic.
    #[test]
    fn prop_alu_matches_machine(a in any::<u32>(), b in any::<u32>()) {
        let (x, y) = (Bits::<32>::new(a), Bits::<32>::new(b));
        prop_assert_eq!(Opcode::Add.apply(x, y).value(), a.wrapping_add(b));
        prop_assert_eq!(Opcode::Sub.apply(x, y).value(), a.wrapping_sub(b));
        prop_assert_eq!(Opcode::Sra.apply(x, y).value(), ((a as i32) >> (b & 31)) as u32);
        prop_assert_eq!(Opcode::Slt.apply(x, y).value(), ((a as i32) < (b as i32)) as u32);
        prop_assert_eq!(Opcode::Sgeu.apply(x, y).value(), (a >= b) as u32);
    }
}
