//! Bridge
//!
//! Remotes (the abstraction) drive devices (the implementation) only
//! through the `Device` trait, so both hierarchies grow independently.

use crate::error::Result;
use std::io::Write;

pub trait Device {
    fn is_enabled(&self) -> bool;
    fn enable(&mut self);
    fn disable(&mut self);
    fn volume(&self) -> i32;
    /// Clamped to 0..=100.
    fn set_volume(&mut self, percent: i32);
    fn channel(&self) -> i32;
    fn set_channel(&mut self, channel: i32);
    fn status(&self) -> String;
}

/// State shared by every concrete device.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Panel {
    on: bool,
    volume: i32,
    channel: i32,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            on: false,
            volume: 30,
            channel: 1,
        }
    }
}

impl Panel {
    fn status(&self, title: &str) -> String {
        let rule = "-".repeat(36);
        format!(
            "{rule}\n| I'm {title}.\n| I'm {}\n| Current volume is {}%\n| Current channel is {}\n{rule}\n",
            if self.on { "enabled" } else { "disabled" },
            self.volume,
            self.channel,
        )
    }
}

macro_rules! impl_device {
    ($device:ty, $title:expr) => {
        impl Device for $device {
            fn is_enabled(&self) -> bool {
                self.panel.on
            }

            fn enable(&mut self) {
                self.panel.on = true;
            }

            fn disable(&mut self) {
                self.panel.on = false;
            }

            fn volume(&self) -> i32 {
                self.panel.volume
            }

            fn set_volume(&mut self, percent: i32) {
                self.panel.volume = percent.clamp(0, 100);
            }

            fn channel(&self) -> i32 {
                self.panel.channel
            }

            fn set_channel(&mut self, channel: i32) {
                self.panel.channel = channel;
            }

            fn status(&self) -> String {
                self.panel.status($title)
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tv {
    panel: Panel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Radio {
    panel: Panel,
}

impl_device!(Tv, "TV set");
impl_device!(Radio, "radio");

pub trait Remote {
    fn power(&mut self, out: &mut dyn Write) -> Result<()>;
    fn volume_down(&mut self, out: &mut dyn Write) -> Result<()>;
    fn volume_up(&mut self, out: &mut dyn Write) -> Result<()>;
    fn channel_down(&mut self, out: &mut dyn Write) -> Result<()>;
    fn channel_up(&mut self, out: &mut dyn Write) -> Result<()>;
    fn set_channel(&mut self, channel: i32, out: &mut dyn Write) -> Result<()>;
}

pub struct BasicRemote<'a> {
    device: &'a mut dyn Device,
}

impl<'a> BasicRemote<'a> {
    pub fn new(device: &'a mut dyn Device) -> Self {
        Self { device }
    }
}

impl Remote for BasicRemote<'_> {
    fn power(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: power toggle")?;
        if self.device.is_enabled() {
            self.device.disable();
        } else {
            self.device.enable();
        }
        Ok(())
    }

    fn volume_down(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: volume down")?;
        let volume = self.device.volume();
        self.device.set_volume(volume - 10);
        Ok(())
    }

    fn volume_up(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: volume up")?;
        let volume = self.device.volume();
        self.device.set_volume(volume + 10);
        Ok(())
    }

    fn channel_down(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: channel down")?;
        let channel = self.device.channel();
        self.device.set_channel(channel.wrapping_sub(1));
        Ok(())
    }

    fn channel_up(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: channel up")?;
        let channel = self.device.channel();
        self.device.set_channel(channel.wrapping_add(1));
        Ok(())
    }

    fn set_channel(&mut self, channel: i32, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: set channel {channel}")?;
        self.device.set_channel(channel);
        Ok(())
    }
}

/// A basic remote plus mute.
pub struct AdvancedRemote<'a> {
    basic: BasicRemote<'a>,
}

impl<'a> AdvancedRemote<'a> {
    pub fn new(device: &'a mut dyn Device) -> Self {
        Self {
            basic: BasicRemote::new(device),
        }
    }

    pub fn mute(&mut self, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "Remote: mute")?;
        self.basic.device.set_volume(0);
        Ok(())
    }
}

impl Remote for AdvancedRemote<'_> {
    fn power(&mut self, out: &mut dyn Write) -> Result<()> {
        self.basic.power(out)
    }

    fn volume_down(&mut self, out: &mut dyn Write) -> Result<()> {
        self.basic.volume_down(out)
    }

    fn volume_up(&mut self, out: &mut dyn Write) -> Result<()> {
        self.basic.volume_up(out)
    }

    fn channel_down(&mut self, out: &mut dyn Write) -> Result<()> {
        self.basic.channel_down(out)
    }

    fn channel_up(&mut self, out: &mut dyn Write) -> Result<()> {
        self.basic.channel_up(out)
    }

    fn set_channel(&mut self, channel: i32, out: &mut dyn Write) -> Result<()> {
        self.basic.set_channel(channel, out)
    }
}

/// Runs the basic-remote then advanced-remote script against `device`.
pub fn test_device(device: &mut dyn Device, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Tests with basic remote.")?;
    BasicRemote::new(device).power(out)?;
    writeln!(out, "{}", device.status())?;

    writeln!(out, "Tests with advanced remote.")?;
    let mut advanced = AdvancedRemote::new(device);
    advanced.power(out)?;
    advanced.mute(out)?;
    writeln!(out, "{}", device.status())?;
    Ok(())
}
