//! Proxy
//!
//! `YoutubeCacheProxy` implements the same interface as the slow client and
//! answers repeated requests from memory. The downloader cannot tell the two
//! apart.

use crate::cache::{CacheStatus, MemoCache};
use crate::config::YoutubeConfig;
use crate::error::Result;
use rand::Rng;
use std::collections::BTreeMap;
use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Video {
    pub id: String,
    pub title: String,
    pub data: String,
}

impl Video {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            data: "Random video.".to_string(),
        }
    }
}

/// Popular videos keyed by page slug.
pub type VideoList = BTreeMap<String, Video>;

pub trait ThirdPartyYoutubeLib {
    fn popular_videos(&mut self, out: &mut dyn Write) -> Result<VideoList>;
    fn get_video(&mut self, video_id: &str, out: &mut dyn Write) -> Result<Video>;
}

/// Simulated round-trip: a random number of ticks in `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkLatency {
    pub min_ticks: u32,
    pub max_ticks: u32,
    pub tick: Duration,
}

impl NetworkLatency {
    pub const NONE: NetworkLatency = NetworkLatency {
        min_ticks: 0,
        max_ticks: 0,
        tick: Duration::ZERO,
    };

    fn experience(&self) {
        let ticks = rand::thread_rng().gen_range(self.min_ticks..=self.max_ticks.max(self.min_ticks));
        for _ in 0..ticks {
            thread::sleep(self.tick);
        }
    }
}

impl From<&YoutubeConfig> for NetworkLatency {
    fn from(config: &YoutubeConfig) -> Self {
        Self {
            min_ticks: config.min_ticks,
            max_ticks: config.max_ticks,
            tick: Duration::from_millis(config.tick_ms),
        }
    }
}

const SERVER: &str = "http://www.youtube.com";

/// The slow "real" client.
#[derive(Debug, Clone)]
pub struct ThirdPartyYoutubeClass {
    latency: NetworkLatency,
}

impl ThirdPartyYoutubeClass {
    pub fn new(latency: NetworkLatency) -> Self {
        Self { latency }
    }

    fn connect_to_server(&self, server: &str, out: &mut dyn Write) -> Result<()> {
        write!(out, "Connecting to {server}... ")?;
        out.flush()?;
        self.latency.experience();
        writeln!(out, "Connected!")?;
        Ok(())
    }

    fn random_videos(&self, out: &mut dyn Write) -> Result<VideoList> {
        write!(out, "Downloading populars... ")?;
        out.flush()?;
        self.latency.experience();

        let list = [
            ("catzzzzzzzzz", "sadgahasgdas", "Catzzzz.avi"),
            ("mkafksangasj", "mkafksangasj", "Dog play with ball.mp4"),
            ("dancesvideoo", "asdfas3ffasd", "Dancing video.mpq"),
            ("dlsdk5jfslaf", "dlsdk5jfslaf", "Barcelona vs RealM.mov"),
            ("3sdfgsd1j333", "3sdfgsd1j333", "Programing lesson#1.avi"),
        ]
        .into_iter()
        .map(|(slug, id, title)| (slug.to_string(), Video::new(id, title)))
        .collect();

        writeln!(out, "Done!")?;
        Ok(list)
    }

    fn some_video(&self, video_id: &str, out: &mut dyn Write) -> Result<Video> {
        write!(out, "Downloading video... ")?;
        out.flush()?;
        self.latency.experience();
        let video = Video::new(video_id, "Some video title");
        writeln!(out, "Done!")?;
        Ok(video)
    }
}

impl ThirdPartyYoutubeLib for ThirdPartyYoutubeClass {
    fn popular_videos(&mut self, out: &mut dyn Write) -> Result<VideoList> {
        self.connect_to_server(SERVER, out)?;
        self.random_videos(out)
    }

    fn get_video(&mut self, video_id: &str, out: &mut dyn Write) -> Result<Video> {
        self.connect_to_server(&format!("{SERVER}/{video_id}"), out)?;
        self.some_video(video_id, out)
    }
}

pub struct YoutubeCacheProxy<L> {
    service: L,
    popular: MemoCache<(), VideoList>,
    videos: MemoCache<String, Video>,
}

impl<L: ThirdPartyYoutubeLib> YoutubeCacheProxy<L> {
    pub fn new(service: L) -> Self {
        Self {
            service,
            popular: MemoCache::new("youtube-popular"),
            videos: MemoCache::new("youtube-videos"),
        }
    }

    /// Drops both caches so the next requests go to the service again.
    pub fn reset(&mut self) {
        self.popular.clear();
        self.videos.clear();
    }

    pub fn service(&self) -> &L {
        &self.service
    }
}

impl<L: ThirdPartyYoutubeLib> ThirdPartyYoutubeLib for YoutubeCacheProxy<L> {
    fn popular_videos(&mut self, out: &mut dyn Write) -> Result<VideoList> {
        let service = &mut self.service;
        let (list, status) = self
            .popular
            .try_lookup((), |_| service.popular_videos(&mut *out))?;
        let list = list.clone();
        if status == CacheStatus::Hit {
            writeln!(out, "Retrieved list from cache.")?;
        }
        Ok(list)
    }

    fn get_video(&mut self, video_id: &str, out: &mut dyn Write) -> Result<Video> {
        let service = &mut self.service;
        let (video, status) = self
            .videos
            .try_lookup(video_id.to_string(), |id| service.get_video(id, &mut *out))?;
        let video = video.clone();
        if status == CacheStatus::Hit {
            writeln!(out, "Retrieved video '{video_id}' from cache.")?;
        }
        Ok(video)
    }
}

const RULE: &str = "-------------------------------";

pub struct YoutubeDownloader<L> {
    api: L,
}

impl<L: ThirdPartyYoutubeLib> YoutubeDownloader<L> {
    pub fn new(api: L) -> Self {
        Self { api }
    }

    pub fn api_mut(&mut self) -> &mut L {
        &mut self.api
    }

    pub fn render_video_page(&mut self, video_id: &str, out: &mut dyn Write) -> Result<()> {
        let video = self.api.get_video(video_id, out)?;
        writeln!(out, "\n{RULE}")?;
        writeln!(out, "Video page (imagine fancy HTML)")?;
        writeln!(out, "ID: {}", video.id)?;
        writeln!(out, "Title: {}", video.title)?;
        writeln!(out, "Video: {}", video.data)?;
        writeln!(out, "{RULE}\n")?;
        Ok(())
    }

    pub fn render_popular_videos(&mut self, out: &mut dyn Write) -> Result<()> {
        let list = self.api.popular_videos(out)?;
        writeln!(out, "\n{RULE}")?;
        writeln!(out, "Most popular videos on Youtube (imagine fancy HTML)")?;
        for video in list.values() {
            writeln!(out, "ID: {} / Title: {}", video.id, video.title)?;
        }
        writeln!(out, "{RULE}\n")?;
        Ok(())
    }

    /// Replays a typical browsing session and reports how long it took.
    pub fn browse(&mut self, out: &mut dyn Write) -> Result<Duration> {
        let started = Instant::now();

        self.render_popular_videos(out)?;
        self.render_video_page("catzzzzzzzzz", out)?;
        self.render_popular_videos(out)?;
        self.render_video_page("dancesvideoo", out)?;
        // Same page again.
        self.render_video_page("catzzzzzzzzz", out)?;
        self.render_video_page("someothervid", out)?;

        let elapsed = started.elapsed();
        writeln!(out, "Time elapsed: {}ms", elapsed.as_millis())?;
        Ok(elapsed)
    }
}

/// Positive when the cached session was faster.
pub fn time_saved_ms(naive: Duration, smart: Duration) -> i128 {
    naive.as_millis() as i128 - smart.as_millis() as i128
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts calls that reach the "network".
    #[derive(Default)]
    struct CountingLib {
        popular_calls: u32,
        video_calls: Vec<String>,
    }

    impl ThirdPartyYoutubeLib for CountingLib {
        fn popular_videos(&mut self, _out: &mut dyn Write) -> Result<VideoList> {
            self.popular_calls += 1;
            let mut list = VideoList::new();
            list.insert("catzzzzzzzzz".to_string(), Video::new("sadgahasgdas", "Catzzzz.avi"));
            Ok(list)
        }

        fn get_video(&mut self, video_id: &str, _out: &mut dyn Write) -> Result<Video> {
            self.video_calls.push(video_id.to_string());
            Ok(Video::new(video_id, "Some video title"))
        }
    }

    #[test]
    fn test_proxy_serves_repeats_from_cache() {
        let mut proxy = YoutubeCacheProxy::new(CountingLib::default());
        let mut out = Vec::new();

        proxy.popular_videos(&mut out).unwrap();
        proxy.popular_videos(&mut out).unwrap();
        proxy.get_video("a", &mut out).unwrap();
        proxy.get_video("b", &mut out).unwrap();
        let again = proxy.get_video("a", &mut out).unwrap();

        assert_eq!(proxy.service().popular_calls, 1);
        assert_eq!(proxy.service().video_calls, vec!["a", "b"]);
        assert_eq!(again.id, "a");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Retrieved list from cache.\n"));
        assert!(output.contains("Retrieved video 'a' from cache.\n"));
    }

    /// Fails its first `fail_first` requests, then answers normally.
    struct FlakyLib {
        fail_first: u32,
        calls: u32,
    }

    impl FlakyLib {
        fn attempt(&mut self) -> Result<()> {
            self.calls += 1;
            if self.calls <= self.fail_first {
                return Err(std::io::Error::new(std::io::ErrorKind::TimedOut, "timeout").into());
            }
            Ok(())
        }
    }

    impl ThirdPartyYoutubeLib for FlakyLib {
        fn popular_videos(&mut self, _out: &mut dyn Write) -> Result<VideoList> {
            self.attempt()?;
            Ok(VideoList::new())
        }

        fn get_video(&mut self, video_id: &str, _out: &mut dyn Write) -> Result<Video> {
            self.attempt()?;
            Ok(Video::new(video_id, "Recovered"))
        }
    }

    #[test]
    fn test_failed_download_is_not_cached() {
        let mut proxy = YoutubeCacheProxy::new(FlakyLib { fail_first: 1, calls: 0 });
        let mut out = Vec::new();

        assert!(proxy.get_video("a", &mut out).is_err());
        let video = proxy.get_video("a", &mut out).unwrap();
        assert_eq!(video.title, "Recovered");
        proxy.get_video("a", &mut out).unwrap();

        assert_eq!(proxy.service().calls, 2);
        let output = String::from_utf8(out).unwrap();
        assert_eq!(output.matches("Retrieved video 'a' from cache.").count(), 1);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut proxy = YoutubeCacheProxy::new(CountingLib::default());
        let mut out = std::io::sink();

        proxy.popular_videos(&mut out).unwrap();
        proxy.get_video("a", &mut out).unwrap();
        proxy.reset();
        proxy.popular_videos(&mut out).unwrap();
        proxy.get_video("a", &mut out).unwrap();

        assert_eq!(proxy.service().popular_calls, 2);
        assert_eq!(proxy.service().video_calls.len(), 2);
    }

    #[test]
    fn test_browse_session_hits_service_four_times_through_proxy() {
        let mut downloader = YoutubeDownloader::new(YoutubeCacheProxy::new(CountingLib::default()));
        let mut out = Vec::new();
        downloader.browse(&mut out).unwrap();

        let service = downloader.api_mut().service();
        assert_eq!(service.popular_calls, 1);
        assert_eq!(service.video_calls, vec!["catzzzzzzzzz", "dancesvideoo", "someothervid"]);
        assert!(String::from_utf8(out).unwrap().contains("Time elapsed: "));
    }

    #[test]
    fn test_real_client_output_and_page_layout() {
        let mut downloader = YoutubeDownloader::new(ThirdPartyYoutubeClass::new(NetworkLatency::NONE));
        let mut out = Vec::new();
        downloader.render_video_page("catzzzzzzzzz", &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Connecting to http://www.youtube.com/catzzzzzzzzz... Connected!\n\
             Downloading video... Done!\n\
             \n\
             -------------------------------\n\
             Video page (imagine fancy HTML)\n\
             ID: catzzzzzzzzz\n\
             Title: Some video title\n\
             Video: Random video.\n\
             -------------------------------\n\
             \n"
        );
    }

    #[test]
    fn test_popular_list_is_ordered_by_slug() {
        let mut client = ThirdPartyYoutubeClass::new(NetworkLatency::NONE);
        let list = client.popular_videos(&mut std::io::sink()).unwrap();
        let slugs: Vec<&str> = list.keys().map(String::as_str).collect();
        assert_eq!(
            slugs,
            vec!["3sdfgsd1j333", "catzzzzzzzzz", "dancesvideoo", "dlsdk5jfslaf", "mkafksangasj"]
        );
        assert_eq!(list["dancesvideoo"].id, "asdfas3ffasd");
    }

    #[test]
    fn test_time_saved_can_be_negative() {
        assert_eq!(time_saved_ms(Duration::from_millis(900), Duration::from_millis(300)), 600);
        assert_eq!(time_saved_ms(Duration::from_millis(1), Duration::from_millis(3)), -2);
    }
}
