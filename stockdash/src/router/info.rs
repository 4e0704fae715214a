use stockdash_core::{Capability, DashboardError, InfoLookup, Ticker};

use crate::Dashboard;

impl Dashboard {
    /// Look up descriptive company information for the detail panel.
    ///
    /// Behavior and trade-offs:
    /// - Routes to `InfoProvider`s in registration order; the first success wins.
    /// - Every failure (unknown symbol, provider error, timeout, no capable
    ///   connector) is reported as `InfoLookup { ticker, msg }`. The lookup is
    ///   independent from history, so snapshots already built are unaffected.
    ///
    /// # Errors
    /// Returns `DashboardError::InfoLookup` when no connector produced an answer.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "stockdash::info", skip(self), fields(ticker = %ticker))
    )]
    pub async fn company_info(&self, ticker: &Ticker) -> Result<InfoLookup, DashboardError> {
        let res = self
            .fetch_single(ticker, Capability::CompanyInfo, "company info", |c, t| {
                c.as_info_provider()?;
                Some(async move {
                    let Some(ip) = c.as_info_provider() else {
                        return Err(DashboardError::unsupported(
                            Capability::CompanyInfo.as_str(),
                        ));
                    };
                    ip.company_info(&t).await
                })
            })
            .await;

        match res {
            Ok(info) => Ok(InfoLookup {
                ticker: ticker.clone(),
                info,
            }),
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "stockdash::info", ticker = %ticker, error = %e, "company info lookup failed");
                Err(DashboardError::info_lookup(ticker.as_str(), e.to_string()))
            }
        }
    }
}
