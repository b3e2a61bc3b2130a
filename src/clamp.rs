/// Generates a numeric newtype whose value is always within a closed range.
/// Example: `clamp!(Channel, u8, 0, 15, 0, pub);`
/// Where:
/// - `Channel` is the name of the generated struct.
/// - `u8` is the underlying data type.
/// - `0` and `15` are the minimum and maximum allowed values.
/// - `0` is the default value.
/// - `pub` is the visibility of the struct.
///
/// Two constructors are generated: `try_new` raises `InvalidArgument` for
/// out-of-range input, while `new` (usable in consts) silently clamps.
/// Wire-side validation (where clamping would silently alter bytes) is done
/// with explicit checks before construction.
macro_rules! clamp {
    ($(#[$meta:meta])* $symbol:ident, $inner_type:ty, $min:expr, $max:expr, $default:expr, $visibility:vis) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Hash)]
        $visibility struct $symbol($inner_type);

        impl Default for $symbol {
            fn default() -> Self {
                Self::new($default)
            }
        }

        impl $symbol {
            /// The smallest allowed value.
            #[allow(dead_code)]
            $visibility const MIN: $inner_type = $min;

            /// The largest allowed value.
            #[allow(dead_code)]
            $visibility const MAX: $inner_type = $max;

            /// Silently clamps the value if it is out of range.
            #[allow(dead_code)]
            $visibility const fn new(value: $inner_type) -> Self {
                Self(Self::clamped(value))
            }

            /// Checks the range instead of clamping. Out-of-range input is an
            /// `InvalidArgument` error.
            #[allow(dead_code)]
            #[allow(unused_comparisons)]
            $visibility fn try_new(value: $inner_type) -> crate::Result<Self> {
                if value < $min || value > $max {
                    return Err(crate::error::InvalidArgumentSnafu {
                        site: site!(),
                        description: format!(
                            "{} is out of range for {} (expected {} through {})",
                            value,
                            stringify!($symbol),
                            $min,
                            $max
                        ),
                    }
                    .build()
                    .into());
                }
                Ok(Self(value))
            }

            /// Returns the inner value.
            #[allow(dead_code)]
            $visibility const fn get(&self) -> $inner_type {
                self.0
            }

            /// Clamps and sets. Returns `false` if `value` was out-of-range.
            #[allow(dead_code)]
            $visibility fn set(&mut self, value: $inner_type) -> bool {
                self.0 = Self::clamped(value);
                self.0 == value
            }

            #[allow(unused_comparisons)]
            const fn clamped(value: $inner_type) -> $inner_type {
                if value < $min {
                    $min
                } else if value > $max {
                    $max
                } else {
                    value
                }
            }
        }

        impl From<$inner_type> for $symbol {
            fn from(value: $inner_type) -> Self {
                Self::new(value)
            }
        }

        impl From<$symbol> for $inner_type {
            fn from(value: $symbol) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $symbol {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

#[test]
fn clamp_test() {
    clamp!(Foo, u8, 1, 16, 1, pub);
    let foo: Foo = 0u8.into();
    let foo_val: u8 = foo.into();
    assert_eq!(1, foo_val);
    assert_eq!(1, Foo::MIN);
    assert_eq!(16, Foo::MAX);
    let mut foo = Foo::new(6);
    assert_eq!("6", format!("{}", foo).as_str());
    assert!(foo.set(16));
    assert!(!foo.set(17));
    assert_eq!(16, foo.get());
}

#[test]
fn try_new_test() {
    clamp!(Bar, u8, 1, 16, 1, pub);
    assert_eq!(16, Bar::try_new(16).unwrap().get());
    for out_of_range in [0u8, 17, 200] {
        let err = Bar::try_new(out_of_range).err().unwrap();
        assert_eq!(crate::ErrorKind::InvalidArgument, err.kind());
        assert!(format!("{}", err).contains("out of range"));
    }
}
