#![warn(missing_docs)]
//! Module for uom macros that shorten the creation of lengths and angles
//!
//! Each macro accepts either a single value, which yields a single quantity, or a comma separated
//! list of values, which yields a `Vec` of quantities.

/// helper macro to create the units
#[macro_export]
macro_rules! uom_unit_creator {
    ($unit:ident, $unit_type:ident, $val:expr) => {
        $unit_type::new::<$unit>($val)
    };
    ($unit:ident, $unit_type:ident, $( $x:expr ),+) => {
        vec![$( $unit_type::new::<$unit>($x) ),+]
    };
}

///macro to create a Length in meter
#[macro_export]
macro_rules! meter {
    ($( $x:expr ),+) => {{
        use uom::si::{f64::Length, length::meter};
        $crate::uom_unit_creator![meter, Length, $( $x ),+]
    }};
}
///macro to create a Length in millimeter
#[macro_export]
macro_rules! millimeter {
    ($( $x:expr ),+) => {{
        use uom::si::{f64::Length, length::millimeter};
        $crate::uom_unit_creator![millimeter, Length, $( $x ),+]
    }};
}
///macro to create an Angle in radian
#[macro_export]
macro_rules! radian {
    ($( $x:expr ),+) => {{
        use uom::si::{angle::radian, f64::Angle};
        $crate::uom_unit_creator![radian, Angle, $( $x ),+]
    }};
}

#[cfg(test)]
mod test {
    use uom::si::{angle::radian, length::millimeter};
    #[test]
    fn single_values() {
        assert_eq!(meter!(1.5).value, 1.5);
        assert_eq!(millimeter!(250.0).get::<millimeter>(), 250.0);
        assert_eq!(radian!(0.25).get::<radian>(), 0.25);
    }
    #[test]
    fn value_lists() {
        let lengths = meter!(1.0, 2.0, 3.0);
        assert_eq!(lengths.len(), 3);
        assert_eq!(lengths[2].value, 3.0);
    }
}
