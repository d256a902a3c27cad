/// How often a failing operation is attempted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt-log", derive(defmt::Format))]
pub enum RetryPolicy {
    /// Keep trying until the operation succeeds.
    #[default]
    Forever,
    /// Give up after this many attempts. At least one attempt is always made.
    Limited(u32),
}

impl RetryPolicy {
    fn allows(&self, attempt: u32) -> bool {
        match self {
            RetryPolicy::Forever => true,
            RetryPolicy::Limited(max) => attempt <= (*max).max(1),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Retried<T> {
    pub value: T,
    pub attempts: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Exhausted<E> {
    pub error: E,
    pub attempts: u32,
}

/// Calls `op` with the 1-based attempt number until it returns `Ok`, or
/// until `policy` runs out of attempts.
///
/// With [`RetryPolicy::Forever`] this only returns once `op` succeeds.
pub fn retry<T, E, F>(policy: RetryPolicy, mut op: F) -> Result<Retried<T>, Exhausted<E>>
where
    F: FnMut(u32) -> Result<T, E>,
{
    let mut attempt: u32 = 1;
    loop {
        match op(attempt) {
            Ok(value) => {
                return Ok(Retried {
                    value,
                    attempts: attempt,
                })
            }
            Err(error) => {
                let next = attempt.saturating_add(1);
                if !policy.allows(next) {
                    return Err(Exhausted {
                        error,
                        attempts: attempt,
                    });
                }
                attempt = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_first_attempt() {
        let res: Result<Retried<u8>, Exhausted<()>> = retry(RetryPolicy::Forever, |_| Ok(7));
        assert_eq!(Ok(Retried { value: 7, attempts: 1 }), res);
    }

    #[test]
    fn test_retry_forever_until_success() {
        let mut calls = 0;
        let res = retry(RetryPolicy::Forever, |attempt| {
            calls += 1;
            assert_eq!(calls, attempt);
            if attempt <= 250 {
                Err("busy")
            } else {
                Ok(attempt)
            }
        });
        assert_eq!(Ok(Retried { value: 251, attempts: 251 }), res);
        assert_eq!(251, calls);
    }

    #[test]
    fn test_retry_limited_exhausted() {
        let mut calls = 0;
        let res: Result<Retried<()>, Exhausted<u32>> = retry(RetryPolicy::Limited(3), |attempt| {
            calls += 1;
            Err(attempt)
        });
        assert_eq!(Err(Exhausted { error: 3, attempts: 3 }), res);
        assert_eq!(3, calls);
    }

    #[test]
    fn test_retry_limited_succeeds_on_last_attempt() {
        let res = retry(RetryPolicy::Limited(3), |attempt| if attempt < 3 { Err(()) } else { Ok(()) });
        assert_eq!(Ok(Retried { value: (), attempts: 3 }), res);
    }

    #[test]
    fn test_retry_limited_zero_makes_one_attempt() {
        let mut calls = 0;
        let res: Result<Retried<()>, Exhausted<()>> = retry(RetryPolicy::Limited(0), |_| {
            calls += 1;
            Err(())
        });
        assert_eq!(Err(Exhausted { error: (), attempts: 1 }), res);
        assert_eq!(1, calls);
    }
}
