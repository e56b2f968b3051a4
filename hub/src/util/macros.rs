/// Invoke another macro once per arity, peeling one parameter off the front each time.
///
/// `for_every_arity!(m !! A, B, C)` expands to `m!(A, B, C); m!(B, C); m!(C); m!();`.
#[macro_export]
#[doc(hidden)]
macro_rules! for_every_arity {
    ($m:ident !!) => {
        $m!();
    };
    ($m:ident !! $head:ident $(, $tail:ident)*) => {
        $m!($head $(, $tail)*);
        $crate::for_every_arity!($m !! $($tail),*);
    };
}

/// Apply a macro to every handler arity from zero to twelve arguments.
#[macro_export]
#[doc(hidden)]
macro_rules! all_arities {
    ($m:ident) => {
        $crate::for_every_arity!($m !! A, B, C, D, E, F, G, H, I, J, K, L);
    };
}
