//! Catalog of conjectured partition identities
//!
//! Each entry pairs a sum-side [`GapFilter`] with a product-side
//! [`CongruenceSpec`]. An identity holds up to `N` when, for every
//! `n <= N`, the number of partitions of `n` accepted by the filter equals
//! the coefficient of q^n in the product.

use std::fmt;
use std::str::FromStr;

use crate::congruence::CongruenceSpec;
use crate::error::{Error, Result};
use crate::filter::{Distance, GapFilter, GapRule};

/// Known outcome of checking an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Verified for every n the tools can reach
    Holds,
    /// Sum and product sides first disagree at `first_failure`
    Fails { first_failure: i32 },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Holds => f.write_str("holds"),
            Status::Fails { first_failure } => write!(f, "fails at n={first_failure}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Unrestricted partitions against Euler's product
    None,
    New01,
    New02,
    New03,
    New04,
    New05,
    New06,
    New06x,
    New06y,
    New07,
    New08,
}

impl Identity {
    pub const ALL: [Identity; 11] = [
        Identity::None,
        Identity::New01,
        Identity::New02,
        Identity::New03,
        Identity::New04,
        Identity::New05,
        Identity::New06,
        Identity::New06x,
        Identity::New06y,
        Identity::New07,
        Identity::New08,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Identity::None => "none",
            Identity::New01 => "new-01",
            Identity::New02 => "new-02",
            Identity::New03 => "new-03",
            Identity::New04 => "new-04",
            Identity::New05 => "new-05",
            Identity::New06 => "new-06",
            Identity::New06x => "new-6x",
            Identity::New06y => "new-6y",
            Identity::New07 => "new-07",
            Identity::New08 => "new-08",
        }
    }

    /// Sum-side restriction
    pub fn filter(self) -> GapFilter {
        use Distance::{One, Two};
        let rule = GapRule::new;
        match self {
            Identity::None => GapFilter::default(),
            Identity::New01 => GapFilter::new(vec![rule(One, &[1], 4, 3)]),
            Identity::New02 => GapFilter::new(vec![rule(One, &[1], 4, 3), rule(One, &[3], 4, 1)]),
            Identity::New03 => GapFilter::new(vec![rule(One, &[0, 1], 5, 0), rule(Two, &[0, 1], 5, 3)]),
            Identity::New04 => GapFilter::new(vec![rule(Two, &[0, 1], 5, 1)]).with_forbidden_prefix(&[1]),
            Identity::New05 => GapFilter::new(vec![rule(Two, &[0, 1], 5, 2)]).with_forbidden_prefix(&[1, 1]),
            Identity::New06 => GapFilter::new(vec![rule(Two, &[0, 1], 5, 3)]),
            Identity::New06x => GapFilter::new(vec![rule(Two, &[0, 1], 5, 4)]),
            Identity::New06y => GapFilter::new(vec![rule(Two, &[0, 1], 5, 0)]),
            Identity::New07 | Identity::New08 => GapFilter::new(vec![
                rule(One, &[2], 4, 0),
                rule(One, &[1], 4, 1),
                rule(One, &[0, 4], 4, 2),
                rule(One, &[1], 4, 3),
            ])
            .with_forbidden_prefix(&[1]),
        }
    }

    /// Product-side congruence
    pub fn congruence(self) -> CongruenceSpec {
        let (modulus, exponents): (usize, &[i32]) = match self {
            Identity::None => (1, &[-1]),
            Identity::New01 => (4, &[-1, -1, -1, 0]),
            Identity::New02 => (6, &[-1, -1, -1, 0, -1, 0]),
            Identity::New03 => (10, &[0, -1, -1, 0, -1, 0, -1, -1, -1, -1]),
            Identity::New04 => (5, &[-1, 0, -1, -1, -1]),
            Identity::New05 => (5, &[-1, -1, 0, -1, -1]),
            Identity::New06 => (5, &[-1, -1, -1, 0, -1]),
            Identity::New06x => (5, &[-1, -1, -1, -1, 0]),
            Identity::New06y => (5, &[0, -1, -1, -1, -1]),
            Identity::New07 | Identity::New08 => (12, &[-1, 0, -1, -1, -1, 0, 0, 0, -1, -1, -1, 0]),
        };
        CongruenceSpec::new(modulus, exponents.to_vec()).expect("catalog congruence table matches its modulus")
    }

    pub fn expected(self) -> Status {
        match self {
            Identity::New03 => Status::Fails { first_failure: 31 },
            _ => Status::Holds,
        }
    }

    /// One-line summary: sum-side rule against forbidden part classes
    pub fn description(self) -> String {
        let congruence = self.congruence();
        let forbidden = congruence.forbidden_residues();
        let product = if forbidden.is_empty() {
            "all parts".to_string()
        } else {
            let list: Vec<String> = forbidden.iter().map(|r| r.to_string()).collect();
            format!("parts not {} (mod {})", list.join(", "), congruence.modulus())
        };
        format!("{}  <=>  {}", self.filter(), product)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Identity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Identity::ALL
            .into_iter()
            .find(|id| id.name() == wanted)
            .ok_or_else(|| Error::UnknownIdentity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::PartitionFilter;
    use crate::generate::Algorithm;
    use crate::partition::Partition;

    fn sum_side(identity: Identity, n: i32) -> i64 {
        let filter = identity.filter();
        let mut count = 0;
        Algorithm::Merca3.generate(n, &mut |p: &Partition| {
            if filter.accept(p) {
                count += 1;
            }
        });
        count
    }

    #[test]
    fn test_names_round_trip() {
        for id in Identity::ALL {
            assert_eq!(id.name().parse::<Identity>().unwrap(), id);
        }
        assert_eq!("NEW-06".parse::<Identity>().unwrap(), Identity::New06);
        assert!("new-99".parse::<Identity>().is_err());
    }

    #[test]
    fn test_congruence_tables_are_well_formed() {
        for id in Identity::ALL {
            let c = id.congruence();
            assert_eq!(c.exponents().len(), c.modulus(), "{id}");
            assert_eq!(c.modulus() == 1, id == Identity::None, "{id}");
        }
        assert_eq!(Identity::New07.congruence().forbidden_residues(), vec![1, 5, 6, 7, 11]);
        assert_eq!(Identity::New03.congruence().forbidden_residues(), vec![0, 3, 5]);
    }

    #[test]
    fn test_product_sides() {
        let cases: [(Identity, [i64; 16]); 4] = [
            (Identity::New01, [1, 1, 2, 2, 4, 5, 8, 9, 14, 17, 25, 29, 41, 49, 67, 79]),
            (Identity::New04, [1, 0, 1, 1, 2, 2, 3, 4, 6, 7, 10, 11, 17, 19, 26, 31]),
            (Identity::New07, [1, 0, 1, 1, 2, 1, 3, 2, 5, 4, 7, 6, 12, 9, 16, 15]),
            (Identity::New06y, [1, 1, 2, 3, 5, 6, 10, 13, 19, 25, 34, 44, 60, 76, 100, 127]),
        ];
        for (id, expected) in cases {
            let s = id.congruence().product_side().unwrap();
            assert_eq!(s.coeffs_upto(16), &expected, "{id}");
        }
    }

    #[test]
    fn test_sum_side_matches_product_side_small_n() {
        for id in Identity::ALL {
            let product = id.congruence().product_side().unwrap();
            for n in 0..=20 {
                assert_eq!(sum_side(id, n), product[n as usize], "{id} at n = {n}");
            }
        }
    }

    #[test]
    fn test_new_03_first_failure() {
        let product = Identity::New03.congruence().product_side().unwrap();
        assert_eq!(sum_side(Identity::New03, 30), product[30]);
        assert_eq!(sum_side(Identity::New03, 31), 1397);
        assert_eq!(product[31], 1396);
        assert_eq!(Identity::New03.expected(), Status::Fails { first_failure: 31 });
    }

    #[test]
    fn test_description() {
        assert_eq!(
            Identity::New06.description(),
            "d2 in {0,1} & s3≡3 (mod 5)  <=>  parts not 3 (mod 5)"
        );
        assert_eq!(Identity::None.description(), "no restriction  <=>  all parts");
    }
}
