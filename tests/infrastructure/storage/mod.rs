mod local_media_store_test;
