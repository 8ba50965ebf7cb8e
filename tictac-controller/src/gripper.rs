use crate::arm_driver::VacuumGripper;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum GripperError {
    #[error("suction not confirmed after {attempts} checks in {waited:?}")]
    SuctionNotConfirmed { attempts: u32, waited: Duration },
    #[error("vacuum gripper actuator failed")]
    Actuator(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, GripperError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GripperState {
    Released,
    Engaged,
}

/// Suction gripper that doesn't trust its own commands.
///
/// Holding a token is only ever reported from the confirmed suction signal.
pub struct GripperInterlock {
    gripper: Box<dyn VacuumGripper>,
    state: GripperState,
    grip_timeout: Duration,
    poll_period: Duration,
}

impl GripperInterlock {
    pub fn new(
        gripper: Box<dyn VacuumGripper>,
        grip_timeout: Duration,
        poll_period: Duration,
    ) -> GripperInterlock {
        GripperInterlock {
            gripper,
            state: GripperState::Released,
            grip_timeout,
            poll_period,
        }
    }

    /// Last commanded state
    pub fn state(&self) -> GripperState {
        self.state
    }

    pub async fn engage(&mut self) -> Result<()> {
        self.gripper.suck().await?;
        self.state = GripperState::Engaged;
        Ok(())
    }

    pub async fn release(&mut self) -> Result<()> {
        self.gripper.blow().await?;
        self.state = GripperState::Released;
        Ok(())
    }

    pub async fn is_holding(&mut self) -> Result<bool> {
        Ok(self.gripper.is_gripping().await?)
    }

    /// Engage and wait for suction to be confirmed.
    ///
    /// Suction is turned back off on every failure after it was engaged.
    pub async fn grip_token(&mut self) -> Result<()> {
        self.engage().await?;
        match self.await_suction().await {
            Ok(()) => Ok(()),
            Err(error) => {
                warn!(%error, "grip failed, releasing");
                if let Err(release_error) = self.release().await {
                    warn!(%release_error, "failed to release suction");
                }
                Err(error)
            }
        }
    }

    async fn await_suction(&mut self) -> Result<()> {
        let started = Instant::now();
        let deadline = started + self.grip_timeout;
        let mut attempts = 0;
        loop {
            attempts += 1;
            if self.is_holding().await? {
                debug!(attempts, "suction confirmed");
                return Ok(());
            }
            if Instant::now() >= deadline {
                break;
            }
            sleep(self.poll_period).await;
        }
        Err(GripperError::SuctionNotConfirmed {
            attempts,
            waited: started.elapsed(),
        })
    }
}
