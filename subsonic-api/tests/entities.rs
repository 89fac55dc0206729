//! Entity refresh and mutation policies against a mock server.

mod helpers;

use helpers::{client, ok, post};
use mockito::Server;
use serde_json::json;
use subsonic_api::{RequestMethod, Refreshable, SubsonicError};

fn jukebox_queue(ids: &[&str]) -> String {
    let entries: Vec<_> = ids.iter().map(|id| json!({"id": id, "title": id})).collect();
    ok(json!({
        "jukeboxPlaylist": {"currentIndex": 0, "playing": true, "gain": 0.5, "entry": entries}
    }))
}

fn jukebox_status() -> String {
    ok(json!({"jukeboxStatus": {"currentIndex": 0, "playing": true, "gain": 0.5}}))
}

#[test]
fn song_decodes_with_gated_album() {
    let mut server = Server::new();
    let _mock = post(
        &mut server,
        "getSong",
        &[("id", "s1")],
        ok(json!({"song": {"id": "s1", "title": "T", "albumId": "a1", "album": "A"}})),
    )
    .create();

    let song = client(&server, RequestMethod::Post).get_song("s1").unwrap();
    let album = song.album.as_ref().unwrap();
    assert_eq!((album.id.as_str(), album.name.as_deref()), ("a1", Some("A")));
    assert!(song.play_count.is_none());
}

#[test]
fn star_patches_locally_without_refetch() {
    let mut server = Server::new();
    let get = post(
        &mut server,
        "getSong",
        &[("id", "s1")],
        ok(json!({"song": {"id": "s1"}})),
    )
    .expect(1)
    .create();
    let star = post(&mut server, "star", &[("id", "s1")], ok(json!({}))).create();

    let song = client(&server, RequestMethod::Post).get_song("s1").unwrap();
    assert!(song.starred.is_none());
    let song = song.star().unwrap();

    assert!(song.starred.is_some());
    star.assert();
    get.assert();
}

#[test]
fn rating_out_of_range_leaves_entity_untouched_on_server() {
    let mut server = Server::new();
    let _get = post(&mut server, "getSong", &[("id", "s1")], ok(json!({"song": {"id": "s1"}})))
        .create();
    let rate = server
        .mock("POST", "/rest/setRating")
        .expect(0)
        .create();

    let song = client(&server, RequestMethod::Post).get_song("s1").unwrap();
    assert!(matches!(
        song.set_rating(6),
        Err(SubsonicError::InvalidArgument(_))
    ));
    rate.assert();
}

#[test]
fn generate_returns_the_server_state() {
    let mut server = Server::new();
    let _artist = post(
        &mut server,
        "getArtist",
        &[("id", "ar1")],
        ok(json!({"artist": {"id": "ar1", "name": "Ar", "albumCount": 2, "album": []}})),
    )
    .create();

    let artist = client(&server, RequestMethod::Post).get_artist("ar1").unwrap();
    let fresh = artist.generate().unwrap();
    assert_eq!(artist, fresh);
    assert_eq!(fresh.albums, Some(vec![]));
}

#[test]
fn jukebox_shuffle_refetches() {
    let mut server = Server::new();
    let get = post(
        &mut server,
        "jukeboxControl",
        &[("action", "get")],
        jukebox_queue(&["1", "2", "3"]),
    )
        .expect(1)
        .create();

    let client = client(&server, RequestMethod::Post);
    let jukebox = client.jukebox_get().unwrap();
    get.assert();
    get.remove();

    let get = post(
        &mut server,
        "jukeboxControl",
        &[("action", "get")],
        jukebox_queue(&["3", "1", "2"]),
    )
        .expect(1)
        .create();
    let shuffle = post(&mut server, "jukeboxControl", &[("action", "shuffle")], jukebox_status())
        .expect(1)
        .create();

    let jukebox = jukebox.shuffle().unwrap();
    let order: Vec<_> = jukebox
        .playlist
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(order, ["3", "1", "2"]);
    shuffle.assert();
    get.assert();
}

#[test]
fn jukebox_remove_patches_locally() {
    let mut server = Server::new();
    let get = post(
        &mut server,
        "jukeboxControl",
        &[("action", "get")],
        jukebox_queue(&["1", "2", "3"]),
    )
        .expect(1)
        .create();
    let remove = post(
        &mut server,
        "jukeboxControl",
        &[("action", "remove"), ("index", "1")],
        jukebox_status(),
    )
    .expect(1)
    .create();

    let jukebox = client(&server, RequestMethod::Post).jukebox_get().unwrap();
    let jukebox = jukebox.remove(1).unwrap();

    let ids: Vec<_> = jukebox.playlist.unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, ["1", "3"]);
    remove.assert();
    get.assert();
}

#[test]
fn jukebox_remove_before_current_takes_index_from_server() {
    let mut server = Server::new();
    let _get = post(
        &mut server,
        "jukeboxControl",
        &[("action", "get")],
        ok(json!({"jukeboxPlaylist": {
            "currentIndex": 2, "playing": true, "gain": 0.5,
            "entry": [{"id": "1"}, {"id": "2"}, {"id": "3"}]
        }})),
    )
    .create();
    let remove = post(
        &mut server,
        "jukeboxControl",
        &[("action", "remove"), ("index", "0")],
        ok(json!({"jukeboxStatus": {"currentIndex": 1, "playing": true, "gain": 0.5}})),
    )
    .expect(1)
    .create();

    let jukebox = client(&server, RequestMethod::Post).jukebox_get().unwrap();
    let jukebox = jukebox.remove(0).unwrap();

    let playlist = jukebox.playlist.unwrap();
    assert_eq!(jukebox.current_index, 1);
    assert_eq!(playlist[usize::try_from(jukebox.current_index).unwrap()].id, "3");
    remove.assert();
}

#[test]
fn jukebox_stop_reports_server_status() {
    let mut server = Server::new();
    let _get = post(&mut server, "jukeboxControl", &[("action", "get")], jukebox_queue(&["1"]))
        .create();
    let _stop = post(
        &mut server,
        "jukeboxControl",
        &[("action", "stop")],
        ok(json!({"jukeboxStatus": {
            "currentIndex": 0, "playing": false, "gain": 0.25, "position": 42
        }})),
    )
    .create();

    let jukebox = client(&server, RequestMethod::Post).jukebox_get().unwrap();
    let jukebox = jukebox.stop().unwrap();
    assert!(!jukebox.playing);
    assert!((jukebox.gain - 0.25).abs() < f32::EPSILON);
    assert_eq!(jukebox.position, Some(42));
    assert_eq!(jukebox.playlist.as_ref().map(Vec::len), Some(1));
}

#[test]
fn jukebox_clear_leaves_an_empty_queue() {
    let mut server = Server::new();
    let _get = post(&mut server, "jukeboxControl", &[("action", "get")], jukebox_queue(&["1"]))
        .create();
    let _clear = post(&mut server, "jukeboxControl", &[("action", "clear")], jukebox_status())
        .create();

    let jukebox = client(&server, RequestMethod::Post).jukebox_get().unwrap();
    let jukebox = jukebox.clear().unwrap();
    assert_eq!(jukebox.playlist, Some(vec![]));
}

#[test]
fn playlist_add_songs_refetches() {
    let mut server = Server::new();
    let get = post(
        &mut server,
        "getPlaylist",
        &[("id", "p1")],
        ok(json!({"playlist": {"id": "p1", "name": "Mix", "entry": [{"id": "s1"}]}})),
    )
    .expect(1)
    .create();
    let playlist = client(&server, RequestMethod::Post).get_playlist("p1").unwrap();
    get.assert();
    get.remove();

    let update = post(
        &mut server,
        "updatePlaylist",
        &[("playlistId", "p1"), ("songIdToAdd", "s2")],
        ok(json!({})),
    )
    .expect(1)
    .create();
    let get = post(
        &mut server,
        "getPlaylist",
        &[("id", "p1")],
        ok(json!({"playlist": {"id": "p1", "name": "Mix", "entry": [{"id": "s1"}, {"id": "s2"}]}})),
    )
    .expect(1)
    .create();

    let playlist = playlist.add_songs(&["s2"]).unwrap();
    assert_eq!(playlist.songs.unwrap().len(), 2);
    update.assert();
    get.assert();
}

#[test]
fn artists_are_flattened_across_indexes() {
    let mut server = Server::new();
    let _mock = post(
        &mut server,
        "getArtists",
        &[],
        ok(json!({"artists": {"ignoredArticles": "The", "index": [
            {"name": "A", "artist": [{"id": "1", "name": "ABBA"}, {"id": "2", "name": "AC/DC"}]},
            {"name": "B", "artist": [{"id": "3", "name": "Beck"}]}
        ]}})),
    )
    .create();

    let artists = client(&server, RequestMethod::Post).get_artists(None).unwrap();
    let names: Vec<_> = artists.iter().filter_map(|a| a.name.as_deref()).collect();
    assert_eq!(names, ["ABBA", "AC/DC", "Beck"]);
}

#[test]
fn music_folders_accept_string_ids() {
    let mut server = Server::new();
    let _mock = post(
        &mut server,
        "getMusicFolders",
        &[],
        ok(json!({"musicFolders": {"musicFolder": [
            {"id": "1", "name": "Music"},
            {"id": 2, "name": "Audiobooks"}
        ]}})),
    )
    .create();

    let client = client(&server, RequestMethod::Post);
    let ids: Vec<_> = client
        .get_music_folders()
        .unwrap()
        .into_iter()
        .map(|f| f.id)
        .collect();
    assert_eq!(ids, ["1", "2"]);
    assert_eq!(client.get_music_folder("1").unwrap().name.as_deref(), Some("Music"));
}

#[test]
fn local_lookup_reports_missing_item() {
    let mut server = Server::new();
    let _mock = post(
        &mut server,
        "getGenres",
        &[],
        ok(json!({"genres": {"genre": [{"value": "Rock", "songCount": 3}]}})),
    )
    .create();

    let client = client(&server, RequestMethod::Post);
    assert_eq!(client.get_genre("Rock").unwrap().song_count, Some(3));
    match client.get_genre("Jazz").unwrap_err() {
        SubsonicError::ResourceNotFound { kind, id } => {
            assert_eq!(kind, "genre");
            assert_eq!(id, "Jazz");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn empty_listing_container_is_an_empty_list() {
    let mut server = Server::new();
    let _mock = post(&mut server, "getPlaylists", &[], ok(json!({"playlists": {}}))).create();

    let playlists = client(&server, RequestMethod::Post).get_playlists(None).unwrap();
    assert!(playlists.is_empty());
}

#[test]
fn entity_outliving_its_client_fails_cleanly() {
    let mut server = Server::new();
    let _mock = post(&mut server, "getSong", &[("id", "s1")], ok(json!({"song": {"id": "s1"}})))
        .create();

    let client = client(&server, RequestMethod::Post);
    let song = client.get_song("s1").unwrap();
    drop(client);

    assert!(matches!(song.generate(), Err(SubsonicError::ClientDropped)));
}
