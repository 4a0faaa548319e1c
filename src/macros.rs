//! Address literal macros with compile-time range checks.

/// Creates a [`GroupAddress`](crate::addressing::GroupAddress) from 3-level notation.
///
/// ```
/// use knx_planner::ga;
///
/// let addr = ga!(1/2/3);
/// assert_eq!(addr.to_string(), "1/2/3");
/// ```
///
/// Out-of-range components fail to compile:
///
/// ```compile_fail
/// let addr = knx_planner::ga!(1/8/0);
/// ```
#[macro_export]
macro_rules! ga {
    ($main:literal / $middle:literal / $sub:literal) => {{
        const _: () = {
            if $main > 31 {
                panic!("Main group must be 0-31");
            }
            if $middle > 7 {
                panic!("Middle group must be 0-7");
            }
            if $sub > 255 {
                panic!("Sub group must be 0-255");
            }
        };
        const RAW: u16 = (($main & 0x1F) << 11) | (($middle & 0x07) << 8) | ($sub & 0xFF);
        $crate::addressing::GroupAddress::from(RAW)
    }};
}

/// Creates a [`PhysicalAddress`](crate::addressing::PhysicalAddress) from its
/// area, line and device components.
///
/// ```
/// use knx_planner::pa;
///
/// let addr = pa!(1, 1, 5);
/// assert_eq!(addr.to_string(), "1.1.5");
/// ```
///
/// ```compile_fail
/// let addr = knx_planner::pa!(16, 0, 0);
/// ```
#[macro_export]
macro_rules! pa {
    ($area:literal, $line:literal, $device:literal) => {{
        const _: () = {
            if $area > 15 {
                panic!("Area must be 0-15");
            }
            if $line > 15 {
                panic!("Line must be 0-15");
            }
            if $device > 255 {
                panic!("Device must be 0-255");
            }
        };
        const RAW: u16 = (($area & 0x0F) << 12) | (($line & 0x0F) << 8) | ($device & 0xFF);
        $crate::addressing::PhysicalAddress::from(RAW)
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_ga_macro() {
        let addr = ga!(2/7/255);
        assert_eq!(addr.main(), 2);
        assert_eq!(addr.middle(), 7);
        assert_eq!(addr.sub(), 255);
    }

    #[test]
    fn test_pa_macro() {
        let addr = pa!(15, 15, 255);
        assert_eq!(addr.area(), 15);
        assert_eq!(addr.line(), 15);
        assert_eq!(addr.device(), 255);
    }
}
