/// Creates a [`Vector`](crate::vec::Vector) containing the arguments,
/// mirroring the standard `vec!` forms: empty, `elem; n`, or a list of
/// values.
#[macro_export]
macro_rules! vector {
    () => (
        $crate::vec::Vector::new()
    );
    ($elem:expr; $n:expr) => (
        $crate::vec::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::vec::from_array([$($x),+])
    );
}
