/// Macro used for test assertions.
#[doc(hidden)]
#[macro_export]
macro_rules! assert_fuzzy_eq {
    ($left:expr, $right:expr) => {{
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(left_val.fuzzy_eq(*right_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq(right)`
  left: `{:?}`,
 right: `{:?}`"#,
                        &*left_val, &*right_val
                    )
                }
            }
        }
    }};
    ($left:expr, $right:expr, $eps:expr) => {{
        match (&$left, &$right, &$eps) {
            (left_val, right_val, eps_val) => {
                if !(left_val.fuzzy_eq_eps(*right_val, *eps_val)) {
                    panic!(
                        r#"assertion failed: `left.fuzzy_eq_eps(right, eps)`
  left: `{:?}`,
 right: `{:?}`
 eps: `{:?}`"#,
                        &*left_val, &*right_val, &*eps_val
                    )
                }
            }
        }
    }};
}

/// Macro used for implementing the geometry macros. Used for extracting macro repetition count
/// for reserving capacity up front.
#[doc(hidden)]
#[macro_export]
macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Construct a line string with the coordinates given as a list of (x, y) tuples.
///
/// # Examples
///
/// ```
/// # use topo_overlay::line_string;
/// # use topo_overlay::geometry::*;
/// let line = line_string![(0.0, 1.0), (2.0, 0.0)];
/// assert_eq!(line.len(), 2);
/// assert_eq!(line.coords[1], Coord::new(2.0, 0.0));
/// ```
#[macro_export]
macro_rules! line_string {
    ($( $x:expr ),* $(,)?) => {
        {
            let size = <[()]>::len(&[$($crate::replace_expr!(($x) ())),*]);
            let mut coords = Vec::with_capacity(size);
            $(
                coords.push($crate::geometry::Coord::new($x.0, $x.1));
            )*
            $crate::geometry::LineString::new(coords)
        }
    };
}

/// Construct a polygon from bracketed lists of (x, y) tuples, the first list is the shell and
/// any following lists are holes. Rings must be given closed.
///
/// # Examples
///
/// ```
/// # use topo_overlay::polygon;
/// let square = polygon![[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]];
/// assert_eq!(square.area(), 16.0);
///
/// let framed = polygon![
///     [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)],
///     [(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)],
/// ];
/// assert_eq!(framed.area(), 12.0);
/// ```
#[macro_export]
macro_rules! polygon {
    ($shell:tt $(, $hole:tt)* $(,)?) => {
        $crate::geometry::Polygon::new(
            $crate::line_string! $shell,
            vec![$($crate::line_string! $hole),*],
        )
    };
}
