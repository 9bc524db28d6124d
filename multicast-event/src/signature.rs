//! Call signatures
//!
//! A dispatcher is parameterized by a tuple of argument *kinds*. Each element
//! is a [`Param`] saying how that argument is passed:
//!
//! - any `T: Clone + 'static` is passed by value (each entry gets a clone)
//! - [`ByRef<T>`] is passed as `&T`
//! - [`ByMut<T>`] is passed as `&mut T`, reborrowed for every entry in turn
//!
//! The [`Arguments`] trait maps the tuple onto the two callable shapes the
//! dispatcher accepts. For `(i32, ByRef<str>, ByMut<Vec<u8>>)`:
//!
//! - plain callable `for<'a> fn(i32, &'a str, &'a mut Vec<u8>)`
//! - bound method `for<'t, 'a> fn(&'t mut T, i32, &'a str, &'a mut Vec<u8>)`
//!
//! Both shapes are higher-ranked over the argument lifetime, so a dispatcher
//! that lives for the whole program can still be invoked with short borrows.
//! It is implemented for tuples of up to eight elements. The result type is
//! always `()`.

use std::marker::PhantomData;

/// How one argument is handed to every registered callable
pub trait Param: 'static {
    /// The argument type seen by callables for a borrow of lifetime `'a`
    type Of<'a>;

    /// Produce the value for the next callable without giving up `value`
    fn reborrow<'a, 'b>(value: &'b mut Self::Of<'a>) -> Self::Of<'b>
    where
        'a: 'b;
}

/// Marker for an argument passed as `&T`
pub struct ByRef<T: ?Sized>(PhantomData<T>);

/// Marker for an argument passed as `&mut T`
pub struct ByMut<T: ?Sized>(PhantomData<T>);

impl<T: Clone + 'static> Param for T {
    type Of<'a> = T;

    fn reborrow<'a, 'b>(value: &'b mut T) -> T
    where
        'a: 'b,
    {
        value.clone()
    }
}

impl<T: ?Sized + 'static> Param for ByRef<T> {
    type Of<'a> = &'a T;

    fn reborrow<'a, 'b>(value: &'b mut &'a T) -> &'b T
    where
        'a: 'b,
    {
        *value
    }
}

impl<T: ?Sized + 'static> Param for ByMut<T> {
    type Of<'a> = &'a mut T;

    fn reborrow<'a, 'b>(value: &'b mut &'a mut T) -> &'b mut T
    where
        'a: 'b,
    {
        &mut **value
    }
}

/// An argument list that can be forwarded to plain and bound callables
pub trait Arguments: 'static {
    /// The argument tuple handed to `invoke` for borrows of lifetime `'a`
    type Args<'a>;

    /// Function pointer type of a plain callable taking these arguments
    type Plain: Copy;

    /// Function pointer type of a method on `T` taking these arguments
    type Method<T: 'static>: Copy;

    /// Hand out the arguments for one callable, keeping them for the next
    fn reborrow<'a, 'b>(args: &'b mut Self::Args<'a>) -> Self::Args<'b>
    where
        'a: 'b;

    /// Call a plain callable with the unpacked tuple
    fn call_plain(f: Self::Plain, args: Self::Args<'_>);

    /// Call a method on `target` with the unpacked tuple
    fn call_method<T: 'static>(m: Self::Method<T>, target: &mut T, args: Self::Args<'_>);

    /// Address of a plain callable, used as its identity
    fn plain_addr(f: Self::Plain) -> usize;

    /// Address of a method, used as half of a bound entry's identity
    fn method_addr<T: 'static>(m: Self::Method<T>) -> usize;
}

macro_rules! impl_arguments {
    ($($name:ident $var:ident),*) => {
        impl<$($name: Param),*> Arguments for ($($name,)*) {
            type Args<'a> = ($(<$name as Param>::Of<'a>,)*);
            type Plain = for<'a> fn($(<$name as Param>::Of<'a>),*);
            type Method<T: 'static> = for<'t, 'a> fn(&'t mut T $(, <$name as Param>::Of<'a>)*);

            #[allow(clippy::unused_unit)]
            fn reborrow<'a, 'b>(args: &'b mut Self::Args<'a>) -> Self::Args<'b>
            where
                'a: 'b,
            {
                let ($($var,)*) = args;
                ($(<$name as Param>::reborrow($var),)*)
            }

            fn call_plain(f: Self::Plain, args: Self::Args<'_>) {
                let ($($var,)*) = args;
                f($($var),*)
            }

            fn call_method<T: 'static>(m: Self::Method<T>, target: &mut T, args: Self::Args<'_>) {
                let ($($var,)*) = args;
                m(target $(, $var)*)
            }

            fn plain_addr(f: Self::Plain) -> usize {
                f as usize
            }

            fn method_addr<T: 'static>(m: Self::Method<T>) -> usize {
                m as usize
            }
        }
    };
}

impl_arguments!();
impl_arguments!(A1 a1);
impl_arguments!(A1 a1, A2 a2);
impl_arguments!(A1 a1, A2 a2, A3 a3);
impl_arguments!(A1 a1, A2 a2, A3 a3, A4 a4);
impl_arguments!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5);
impl_arguments!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6);
impl_arguments!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7);
impl_arguments!(A1 a1, A2 a2, A3 a3, A4 a4, A5 a5, A6 a6, A7 a7, A8 a8);
