//! Argument tuples handed to a wrapped constructor.

use std::fmt::Debug;

/// A tuple of constructor arguments that can be shown in a trace line.
///
/// Implemented for `()` and for tuples of up to eight `Debug` values.
pub trait ArgList {
    /// The arguments in order, for rendering.
    fn debug_args(&self) -> Vec<&dyn Debug>;
}

impl ArgList for () {
    fn debug_args(&self) -> Vec<&dyn Debug> {
        Vec::new()
    }
}

macro_rules! impl_arg_list {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Debug),+> ArgList for ($($name,)+) {
            fn debug_args(&self) -> Vec<&dyn Debug> {
                vec![$(&self.$idx as &dyn Debug),+]
            }
        }
    };
}

impl_arg_list!(A: 0);
impl_arg_list!(A: 0, B: 1);
impl_arg_list!(A: 0, B: 1, C: 2);
impl_arg_list!(A: 0, B: 1, C: 2, D: 3);
impl_arg_list!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_arg_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_arg_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_arg_list!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
